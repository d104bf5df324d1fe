use std::{net::SocketAddr, sync::Arc, time::Duration};

use employee_admin_for_warp::{
    build_api_route_filter, handle_admin_errors, Admin, AdminConfig, InMemoryEmployees,
    JwtProperties, JwtSigner,
};
use tracing_subscriber::EnvFilter;
use warp::Filter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let jwt = JwtProperties::from_env().unwrap_or_else(|err| {
        tracing::warn!("{err}, falling back to the demo token settings");
        JwtProperties {
            admin_secret_key: "this is a really bad secret".into(),
            admin_ttl: Duration::from_secs(2 * 60 * 60),
        }
    });

    let employees = Arc::new(InMemoryEmployees::with_administrator("this is a terrible salt").await?);

    let admin = Admin::new(AdminConfig {
        jwt,
        signer: Arc::new(JwtSigner),
        authentication: employees.clone(),
        employees,
    });

    let homepage = warp::path::end().then(|| async move { warp::reply::html("hello, world!") });

    let all_routes = homepage
        .or(build_api_route_filter(&admin))
        .recover(handle_admin_errors)
        .with(warp::trace::request());

    let addr: SocketAddr = "127.0.0.1:4000".parse()?;
    tracing::info!("listening on {addr}");
    warp::serve(all_routes).run(addr).await;

    Ok(())
}
