use std::io::{self, Write};
use std::time::Duration;

const BEEPS: usize = 3;
const BEEP_GAP: Duration = Duration::from_millis(600);

/// Ring the terminal bell a few times without blocking the caller
pub fn ring() {
    tokio::spawn(async {
        for i in 0..BEEPS {
            if i > 0 {
                tokio::time::sleep(BEEP_GAP).await;
            }

            let mut stdout = io::stdout();
            if let Err(e) = stdout.write_all(b"\x07").and_then(|()| stdout.flush()) {
                tracing::debug!("Could not ring terminal bell: {}", e);
                return;
            }
        }
    });
}
