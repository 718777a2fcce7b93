//! Session commands.

use anyhow::Result;
use dialoguer::{Input, Password};
use shelf_auth::{LoginForm, RegisterForm};

use super::{LoginArgs, RegisterArgs};
use crate::context::Context;

pub async fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let email = prompt_missing(args.email, "Email")?;
    let password = match args.password {
        Some(password) => password,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let client = ctx.client()?;
    let spinner = ctx.output.spinner("Signing in...");
    let result = client.login(&LoginForm::new(email, password)).await;
    spinner.finish_and_clear();
    result?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "authenticated": true }));
    } else {
        ctx.output.success("Logged in");
    }
    Ok(())
}

pub async fn register(args: RegisterArgs, ctx: &Context) -> Result<()> {
    let name = prompt_missing(args.name, "Name")?;
    let email = prompt_missing(args.email, "Email")?;
    let password = match args.password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?,
    };

    let client = ctx.client()?;
    let spinner = ctx.output.spinner("Creating account...");
    let result = client
        .register(&RegisterForm::new(name, email.clone(), password))
        .await;
    spinner.finish_and_clear();
    result?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "registered": email }));
    } else {
        ctx.output.success(&format!("Account created for {}", email));
        ctx.output.info("Run `shelf login` to sign in.");
    }
    Ok(())
}

pub async fn logout(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let was_authenticated = client.session().is_authenticated();
    client.logout()?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "authenticated": false }));
    } else if was_authenticated {
        ctx.output.success("Logged out");
    } else {
        ctx.output.info("Not logged in");
    }
    Ok(())
}

pub async fn whoami(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let user = client.me().await?;

    if ctx.output.is_json() {
        ctx.output.json(&user);
        return Ok(());
    }

    ctx.output.header(user.display_name());
    ctx.output.kv("id", user.id.as_str());
    ctx.output.kv("email", &user.email);
    if let Some(username) = &user.username {
        ctx.output.kv("username", username);
    }
    Ok(())
}

fn prompt_missing(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::<String>::new().with_prompt(prompt).interact_text()?),
    }
}
