use clap::Args;
use jiff::{SignedDuration, Timestamp};
use kiosk_app::auth::{JwtAuthService, LoggedInUser, UserId};

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// User id the token is issued to
    #[arg(long)]
    user_id: String,

    /// Grant administrative privileges
    #[arg(long)]
    admin: bool,

    /// Token lifetime in hours
    #[arg(long, default_value_t = 24)]
    ttl_hours: u32,

    /// HMAC secret shared with the JSON API
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,
}

pub(crate) fn run(args: CreateTokenArgs) -> Result<(), String> {
    if args.user_id.trim().is_empty() {
        return Err("user-id cannot be empty".to_string());
    }

    if args.ttl_hours == 0 {
        return Err("ttl-hours must be positive".to_string());
    }

    let service = JwtAuthService::new(&args.jwt_secret)
        .map_err(|error| format!("failed to initialise token signing: {error}"))?;

    let ttl = SignedDuration::from_hours(i64::from(args.ttl_hours));

    let user = LoggedInUser {
        id: UserId::from(args.user_id),
        is_admin: args.admin,
    };

    let token = service
        .issue_token(&user, ttl)
        .map_err(|error| format!("failed to create token: {error}"))?;

    let expires_at = Timestamp::now()
        .checked_add(ttl)
        .map_err(|error| format!("invalid token lifetime: {error}"))?;

    println!("user_id: {}", user.id);
    println!("is_admin: {}", user.is_admin);
    println!("token_expires_at: {expires_at}");
    println!("bearer_token: {token}");

    Ok(())
}
