use super::AppContext;
use anyhow::{Result, bail};
use learnhub_core::course::{Course, CourseQuery};

pub async fn list(ctx: &AppContext, search: String, page: u32, limit: u32) -> Result<()> {
    ctx.require_auth("/courses").await?;

    let courses = ctx
        .courses
        .fetch_courses(&CourseQuery {
            page,
            limit,
            search,
        })
        .await?;

    print_courses(&courses);
    Ok(())
}

pub async fn mine(ctx: &AppContext) -> Result<()> {
    ctx.require_auth("/courses").await?;

    let courses = ctx
        .courses
        .fetch_my_courses(&CourseQuery::default())
        .await?;

    print_courses(&courses);
    Ok(())
}

pub async fn enroll(ctx: &AppContext, course_id: &str) -> Result<()> {
    ctx.require_auth("/courses").await?;

    let course = find_course(ctx, course_id).await?;
    ctx.courses.enroll(&course).await?;
    Ok(())
}

pub async fn unenroll(ctx: &AppContext, course_id: &str) -> Result<()> {
    ctx.require_auth("/courses").await?;

    let course = find_course(ctx, course_id).await?;
    ctx.courses.unenroll(&course).await?;
    Ok(())
}

/// Resolves a course id against the current listing page.
async fn find_course(ctx: &AppContext, course_id: &str) -> Result<Course> {
    let courses = ctx.courses.fetch_courses(&CourseQuery::default()).await?;
    match courses.into_iter().find(|course| course.id == course_id) {
        Some(course) => Ok(course),
        None => bail!(
            "course '{}' not found on the first page - try `learnhub courses list --search`",
            course_id
        ),
    }
}

fn print_courses(courses: &[Course]) {
    if courses.is_empty() {
        println!("No courses found.");
        return;
    }
    for course in courses {
        let marker = if course.is_enrolled { "*" } else { " " };
        println!(
            "{} {}  {}  ({} sections, created {})",
            marker,
            course.id,
            course.title,
            course.content.len(),
            course.created_at.format("%Y-%m-%d")
        );
    }
}
