// heron-client/examples/leave_console.rs
// Minimal wiring demo: login, restore the session, guard a navigation and
// list leave records from the console.

use std::sync::Arc;

use heron_client::{
    ClientConfig, HttpClient, LeaveListController, Navigation, Navigator, Session, SessionStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        println!("Usage: {} <username> <password>", args[0]);
        println!("  HERON_API_URL must point at the HR backend");
        return Ok(());
    }

    let config = ClientConfig::from_env()
        .unwrap_or_else(|| ClientConfig::new("http://localhost:8080"));
    let store = Arc::new(SessionStore::new(&config.data_dir));
    let mut http = HttpClient::new(&config);

    // Restore a persisted session or log in fresh.
    let session = match store.load() {
        Some(session) => session,
        None => {
            let response = http.login(&args[1], &args[2]).await?;
            let session = Session {
                token: response.token,
                user: response.user,
            };
            store.save(&session)?;
            store.remember_username(&args[1])?;
            session
        }
    };
    http.set_token(Some(session.token.clone()));
    tracing::info!(user = %session.user.name, role = %session.user.role, "signed in");

    let mut navigator = Navigator::new(store);
    navigator.start();

    match navigator.resolve("/leave-records") {
        Navigation::Render(path) => tracing::info!(path, "navigation allowed"),
        denied => {
            tracing::warn!(?denied, "navigation denied");
            return Ok(());
        }
    }

    let mut controller = LeaveListController::new(http, session.user);
    controller.load_all().await;

    if let Some(banner) = controller.banner() {
        println!("{}", banner.message());
    }
    println!("{}", controller.caption().unwrap_or("no results"));
    for record in controller.records() {
        println!(
            "#{} {} {} {} -> {} ({} days) [{}]",
            record.leave_id,
            record.staff_name,
            record.leave_type,
            record.start_date,
            record.end_date,
            record.days,
            record.status
        );
    }

    Ok(())
}
