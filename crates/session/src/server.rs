//! Single-writer server actor.
//!
//! One tokio task owns the [`Coordinator`] and every client outbox. Transport
//! tasks talk to it through a cloneable [`ServerHandle`], so room state is only
//! ever touched by one task and events are handled strictly in arrival order.

use rand::rngs::StdRng;
use rand::Rng;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::ServerConfig;
use crate::coordinator::{Coordinator, Dispatch};
use crate::error::ServerClosed;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::room::ClientId;

pub type Outbox = mpsc::UnboundedSender<ServerMessage>;

/// Inbound events for the actor.
#[derive(Debug)]
pub enum Command {
    Connect { client: ClientId, outbox: Outbox },
    Message { client: ClientId, msg: ClientMessage },
    Disconnect { client: ClientId },
    /// Delayed match start, queued behind any events that arrived meanwhile
    StartMatch { room_id: String, round: u64 },
}

pub struct SessionServer<R = StdRng> {
    coordinator: Coordinator<R>,
    clients: HashMap<ClientId, Outbox>,
    /// Route for timers to feed commands back in. Weak, so the actor still stops
    /// once every handle is dropped.
    loopback: Option<mpsc::WeakUnboundedSender<Command>>,
}

impl SessionServer<StdRng> {
    /// Start an actor with a fresh coordinator built from `config`.
    pub fn spawn(config: &ServerConfig) -> ServerHandle {
        Self::new(Coordinator::new(config)).start()
    }
}

impl<R: Rng + Send + 'static> SessionServer<R> {
    pub fn new(coordinator: Coordinator<R>) -> Self {
        Self {
            coordinator,
            clients: HashMap::new(),
            loopback: None,
        }
    }

    /// Move the server onto its own task and return the handle to it.
    pub fn start(mut self) -> ServerHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        self.loopback = Some(tx.downgrade());
        tokio::spawn(self.run(rx));
        ServerHandle { tx }
    }

    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<Command>) {
        while let Some(cmd) = rx.recv().await {
            self.apply(cmd);
        }
        debug!("session server stopped");
    }

    fn apply(&mut self, cmd: Command) {
        match cmd {
            Command::Connect { client, outbox } => {
                info!(%client, "client connected");
                self.clients.insert(client, outbox);
            }
            Command::Message { client, msg } => {
                debug!(%client, ?msg, "client message");
                let out = self.coordinator.handle(client, msg);
                self.deliver(out);
            }
            Command::Disconnect { client } => {
                if self.clients.remove(&client).is_none() {
                    return;
                }
                info!(%client, "client disconnected");
                let out = self.coordinator.disconnect(client);
                self.deliver(out);
            }
            Command::StartMatch { room_id, round } => {
                let out = self.coordinator.start_match(&room_id, round);
                self.deliver(out);
            }
        }
    }

    fn deliver(&mut self, out: Vec<Dispatch>) {
        for dispatch in out {
            match dispatch {
                Dispatch::To { client, message } => self.send_to(client, message),
                Dispatch::StartAfter {
                    room_id,
                    round,
                    delay,
                } => {
                    if delay.is_zero() {
                        self.apply(Command::StartMatch { room_id, round });
                        continue;
                    }
                    let Some(loopback) = self.loopback.clone() else {
                        continue;
                    };
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        // Actor may have shut down meanwhile; nothing left to do then
                        if let Some(tx) = loopback.upgrade() {
                            let _ = tx.send(Command::StartMatch { room_id, round });
                        }
                    });
                }
                Dispatch::Broadcast { message } => {
                    for outbox in self.clients.values() {
                        let _ = outbox.send(message.clone());
                    }
                }
            }
        }
    }

    fn send_to(&self, client: ClientId, message: ServerMessage) {
        match self.clients.get(&client) {
            Some(outbox) => {
                if outbox.send(message).is_err() {
                    debug!(%client, "outbox closed, message dropped");
                }
            }
            None => debug!(%client, "message for unknown client dropped"),
        }
    }
}

/// Cloneable front door to a running [`SessionServer`].
#[derive(Clone, Debug)]
pub struct ServerHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl ServerHandle {
    /// Register `client` and return the stream of messages addressed to it.
    pub fn connect(&self, client: ClientId) -> Result<mpsc::UnboundedReceiver<ServerMessage>, ServerClosed> {
        let (outbox, inbox) = mpsc::unbounded_channel();
        self.attach(client, outbox)?;
        Ok(inbox)
    }

    /// Register `client` with an outbox the caller created.
    pub fn attach(&self, client: ClientId, outbox: Outbox) -> Result<(), ServerClosed> {
        self.command(Command::Connect { client, outbox })
    }

    pub fn send(&self, client: ClientId, msg: ClientMessage) -> Result<(), ServerClosed> {
        self.command(Command::Message { client, msg })
    }

    pub fn disconnect(&self, client: ClientId) -> Result<(), ServerClosed> {
        self.command(Command::Disconnect { client })
    }

    fn command(&self, cmd: Command) -> Result<(), ServerClosed> {
        self.tx.send(cmd).map_err(|_| ServerClosed)
    }
}
