use super::AppContext;
use anyhow::Result;

pub async fn show(ctx: &AppContext, course_id: &str) -> Result<()> {
    ctx.require_auth("/courses").await?;

    let progress = ctx.courses.fetch_progress(course_id).await?;

    println!("Progress: {:.0}%", progress.percentage);
    if let Some(course) = &progress.course {
        println!("Course:   {}", course.title);
    }
    if let Some(last) = progress.last_accessed {
        println!("Last accessed: {}", last.format("%Y-%m-%d %H:%M"));
    }
    if !progress.completed_content.is_empty() {
        println!("Completed sections:");
        for content_id in &progress.completed_content {
            println!("  - {}", content_id);
        }
    }
    Ok(())
}

pub async fn complete(ctx: &AppContext, course_id: &str, content_id: &str) -> Result<()> {
    ctx.require_auth("/courses").await?;

    let progress = ctx.courses.update_progress(course_id, content_id).await?;
    println!("Progress: {:.0}%", progress.percentage);
    Ok(())
}
