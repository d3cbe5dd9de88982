//! TCP bridge for the session server.
//!
//! Each connection speaks newline-delimited JSON: one `ClientMessage` per line in,
//! one `ServerMessage` per line out.
//!
//! Usage: draughts_server [config.toml]

use anyhow::Context;
use session::{ClientId, ClientMessage, ServerConfig, ServerHandle, ServerMessage, SessionServer};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ServerConfig::load(Path::new(&path)).with_context(|| format!("loading {path}"))?,
        None => ServerConfig::default(),
    };

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "draughts server listening");

    let server = SessionServer::spawn(&config);
    loop {
        let (stream, peer) = listener.accept().await?;
        let server = server.clone();
        tokio::spawn(async move {
            if let Err(err) = serve_client(stream, server).await {
                warn!(%peer, %err, "connection ended with error");
            }
        });
    }
}

async fn serve_client(stream: TcpStream, server: ServerHandle) -> anyhow::Result<()> {
    let client = ClientId::new();
    let (reader, mut writer) = stream.into_split();
    let (outbox, mut inbox) = mpsc::unbounded_channel::<ServerMessage>();
    server.attach(client, outbox.clone())?;
    debug!(%client, "connection attached");

    let writer_task = tokio::spawn(async move {
        while let Some(msg) = inbox.recv().await {
            let mut line = serde_json::to_string(&msg)?;
            line.push('\n');
            writer.write_all(line.as_bytes()).await?;
        }
        Ok::<_, anyhow::Error>(())
    });

    let read_result = read_messages(reader, client, &server, &outbox).await;

    // Disconnect first so the actor drops its copy of the outbox
    server.disconnect(client)?;
    drop(outbox);
    writer_task.await??;
    read_result
}

async fn read_messages(
    reader: tokio::net::tcp::OwnedReadHalf,
    client: ClientId,
    server: &ServerHandle,
    outbox: &mpsc::UnboundedSender<ServerMessage>,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(reader).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<ClientMessage>(&line) {
            Ok(msg) => server.send(client, msg)?,
            Err(err) => {
                warn!(%client, %err, "unreadable message");
                let _ = outbox.send(ServerMessage::error(format!("unreadable message: {err}")));
            }
        }
    }
    Ok(())
}
