use super::AppContext;
use anyhow::Result;
use learnhub_core::auth::{Credentials, Signup};

pub async fn login(ctx: &AppContext, email: String, password: String) -> Result<()> {
    let profile = ctx
        .sessions
        .login(&Credentials { email, password })
        .await?;
    println!("Logged in as {} <{}>", profile.name, profile.email);
    Ok(())
}

pub async fn logout(ctx: &AppContext) -> Result<()> {
    ctx.sessions.logout().await?;
    Ok(())
}

pub async fn whoami(ctx: &AppContext) -> Result<()> {
    match ctx.sessions.current_user().await {
        Some(profile) => {
            println!(
                "{} <{}> ({})",
                profile.name,
                profile.email,
                profile.role.as_str()
            );
        }
        None => println!("Not logged in."),
    }
    Ok(())
}

pub async fn register(
    ctx: &AppContext,
    name: String,
    email: String,
    password: String,
    instructor: bool,
) -> Result<()> {
    let signup = Signup {
        name,
        email,
        password,
    };
    let profile = if instructor {
        ctx.sessions.register_instructor(&signup).await?
    } else {
        ctx.sessions.register(&signup).await?
    };
    println!("Registered as {} <{}>", profile.name, profile.email);
    Ok(())
}
