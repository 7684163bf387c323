//! # Auth Commands
//!
//! ```text
//! login / signup ──► validate form ──► POST ──► session saved to disk
//! logout         ──► session file removed
//! whoami         ──► read saved session (no network)
//! ```

use tracing::info;

use invoiceflow_client::Session;
use invoiceflow_core::{LoginForm, RegistrationForm};

use crate::error::AppResult;
use crate::{AppContext, LoginArgs, SignupArgs};

pub async fn login(ctx: &AppContext, args: LoginArgs) -> AppResult<()> {
    let form = LoginForm {
        email: args.email,
        password: args.password,
    };

    let session = ctx.client.login(&form).await?;
    info!("Signed in");
    println!("Signed in as {}", who(&session, &form.email));
    Ok(())
}

pub async fn signup(ctx: &AppContext, args: SignupArgs) -> AppResult<()> {
    let form = RegistrationForm {
        username: args.username,
        email: args.email,
        password: args.password,
        confirm_password: args.confirm_password,
        agree_to_terms: args.agree_to_terms,
    };

    let session = ctx.client.register(&form).await?;
    info!("Account created");
    println!("Account created. Signed in as {}", who(&session, &form.username));
    Ok(())
}

pub async fn logout(ctx: &AppContext) -> AppResult<()> {
    ctx.client.logout().await?;
    println!("Signed out");
    Ok(())
}

pub async fn whoami(ctx: &AppContext) -> AppResult<()> {
    match ctx.client.session().current().await {
        Some(session) if !session.is_expired() => {
            println!("{}", describe(&session));
        }
        _ => println!("Not signed in"),
    }
    Ok(())
}

fn who<'a>(session: &'a Session, fallback: &'a str) -> &'a str {
    session
        .user()
        .and_then(|user| user.display_name())
        .unwrap_or(fallback)
}

fn describe(session: &Session) -> String {
    let mut line = format!("Signed in as {}", who(session, "unknown user"));
    if let Some(email) = session.user().and_then(|user| user.email.as_deref()) {
        line.push_str(&format!(" <{}>", email));
    }
    if let Some(expires) = session.expires_at() {
        line.push_str(&format!(", session expires {}", expires.format("%Y-%m-%d %H:%M UTC")));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoiceflow_client::UserProfile;

    #[test]
    fn test_describe_prefers_profile_name() {
        let user = UserProfile {
            id: Some("u1".to_string()),
            username: Some("asha".to_string()),
            email: Some("asha@example.com".to_string()),
        };
        let session = Session::new("not-a-jwt", Some(user));

        assert_eq!(describe(&session), "Signed in as asha <asha@example.com>");
    }

    #[test]
    fn test_who_falls_back_without_profile() {
        let session = Session::new("not-a-jwt", None);
        assert_eq!(who(&session, "asha@example.com"), "asha@example.com");
    }
}
