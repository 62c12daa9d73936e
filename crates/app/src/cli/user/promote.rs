use clap::Args;
use storefront_app::{
    auth::{DEFAULT_TOKEN_TTL, TokenKeys},
    database::{self, Db},
    domain::users::{PgUsersService, UsersService},
};

#[derive(Debug, Args)]
pub(crate) struct PromoteUserArgs {
    /// Email address of the account to promote
    #[arg(long)]
    email: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Secret used to sign access tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,
}

pub(crate) async fn run(args: PromoteUserArgs) -> Result<(), String> {
    let email = args.email.trim();

    if email.is_empty() {
        return Err("email cannot be empty".to_string());
    }

    let pool = database::connect(&args.database_url, 1)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let keys = TokenKeys::from_secret(args.jwt_secret.as_bytes(), DEFAULT_TOKEN_TTL);
    let service = PgUsersService::new(Db::new(pool), keys);

    let user = service
        .find_user_by_email(email)
        .await
        .map_err(|error| format!("failed to find user '{email}': {error}"))?;

    if user.is_admin {
        println!("{} is already an admin", user.email);

        return Ok(());
    }

    let user = service
        .grant_admin(user.uuid)
        .await
        .map_err(|error| format!("failed to promote user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("promoted {} to admin", user.email);

    Ok(())
}
