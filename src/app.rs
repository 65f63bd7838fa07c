use log::error;

pub struct App {}

impl App {
    pub async fn start(shutdown_sender: tokio::sync::watch::Sender<String>) -> Result<(), ()> {
        // listen for program termination
        tokio::signal::ctrl_c()
            .await
            .map_err(|e| error!("ctrl-c error = {:?}", e))?;

        // notify the timer loop so the relays get shut off
        shutdown_sender
            .send("ctrl-c received!".to_string())
            .map_err(|_| {})
    }
}
