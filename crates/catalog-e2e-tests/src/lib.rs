use std::path::Path;

use anyhow::{Result, anyhow};
use catalog_app::page::ViewEnvelope;
use catalog_server::config::{Parser, ServerConfig};
use rand::Rng as _;
use reqwest::{StatusCode, Url, header::LOCATION, redirect};
use tempfile::TempDir;
use tracing::debug;

fn random_port() -> Result<u16> {
    let mut rng = rand::rng();

    let mut retries = 3;
    while retries > 0 {
        let port: u16 = rng.random_range(3030..4030);
        let addr: std::net::SocketAddr = format!("127.0.0.1:{}", port).parse()?;
        match std::net::TcpStream::connect_timeout(&addr, std::time::Duration::from_millis(100)) {
            Err(e) if e.kind() == std::io::ErrorKind::ConnectionRefused => return Ok(port),
            Err(_) => retries -= 1,
            Ok(_) => retries -= 1,
        }
    }

    Err(anyhow!("Could not find a free port"))
}

pub struct ConfigGuard {
    #[allow(dead_code)]
    data_dir: TempDir,
}

pub fn test_config(test_name: &str, base_dir: &Path) -> Result<(ServerConfig, ConfigGuard)> {
    let tmp_data_dir = TempDir::with_prefix_in(format!("{}_", test_name), base_dir)?;
    let data_dir = tmp_data_dir.path().to_string_lossy().to_string();
    let port = random_port()?.to_string();
    let base_url = format!("http://localhost:{}", port);
    let args = &[
        "catalog-e2e-tests",
        "--data-dir",
        &data_dir,
        "--port",
        &port,
        "--base-url",
        &base_url,
    ];
    let config = ServerConfig::try_parse_from(args)?;
    Ok((
        config,
        ConfigGuard {
            data_dir: tmp_data_dir,
        },
    ))
}

/// Config with fresh data dir and database with applied migrations.
pub async fn prepare_env(test_name: &str) -> Result<(ServerConfig, ConfigGuard)> {
    let base_dir = std::env::temp_dir();
    let (args, guard) = test_config(test_name, &base_dir)?;
    let pool = catalog_dal::new_pool(&args.database_url()).await?;
    catalog_dal::migrate(&pool).await?;
    pool.close().await;
    Ok((args, guard))
}

pub async fn spawn_server(args: ServerConfig) -> Result<()> {
    let base_url = args.base_url.clone();
    tokio::spawn(async move {
        if let Err(e) = catalog_server::run::run(args).await {
            tracing::error!("Server failed: {e}");
        }
    });

    let client = reqwest::Client::new();
    let health_url = base_url.join("health")?;
    for _ in 0..50 {
        if let Ok(response) = client.get(health_url.clone()).send().await {
            if response.status().is_success() {
                return Ok(());
            }
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }
    Err(anyhow!("Server did not start"))
}

/// Client which does not follow redirects, so they can be checked.
pub fn page_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .redirect(redirect::Policy::none())
        .build()?;
    Ok(client)
}

pub fn extend_url(url: &Url, segment: impl ToString) -> Url {
    let mut url = url.clone();
    url.path_segments_mut().unwrap().push(&segment.to_string());
    url
}

pub async fn get_view(client: &reqwest::Client, url: Url) -> Result<ViewEnvelope> {
    let response = client.get(url).send().await?;
    debug!("Response: {:#?}", response);
    if response.status() != StatusCode::OK {
        return Err(anyhow!("Unexpected status {}", response.status()));
    }
    Ok(response.json().await?)
}

pub async fn post_form(
    client: &reqwest::Client,
    url: Url,
    form: &[(&str, &str)],
) -> Result<reqwest::Response> {
    let response = client.post(url).form(form).send().await?;
    debug!("Response: {:#?}", response);
    Ok(response)
}

pub fn redirect_location(response: &reqwest::Response) -> Option<String> {
    if response.status() != StatusCode::SEE_OTHER {
        return None;
    }
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}
