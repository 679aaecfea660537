//! libcurl easy-handle transport: HEAD probe and single-stream GET with
//! optional basic auth.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

use curl::easy::{Auth, Easy};

use super::{label_for, Transport, TransferError};
use crate::credentials::Credentials;
use crate::progress::{ProgressSink, TransferProgress};

const USER_AGENT: &str = concat!("sasdl/", env!("CARGO_PKG_VERSION"));

/// Blocking libcurl transport. Each call uses a fresh easy handle.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    /// Connect timeout; `None` keeps the libcurl default.
    pub connect_timeout: Option<Duration>,
}

impl CurlTransport {
    pub fn new(connect_timeout: Option<Duration>) -> Self {
        Self { connect_timeout }
    }

    fn handle(&self, url: &str, auth: Option<&Credentials>) -> Result<Easy, TransferError> {
        let mut easy = Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.useragent(USER_AGENT)?;
        if let Some(t) = self.connect_timeout {
            easy.connect_timeout(t)?;
        }
        if let Some(c) = auth {
            let mut basic = Auth::new();
            basic.basic(true);
            easy.http_auth(&basic)?;
            easy.username(c.username())?;
            easy.password(c.password())?;
        }
        Ok(easy)
    }
}

fn check_status(easy: &mut Easy) -> Result<(), TransferError> {
    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(TransferError::Http(code));
    }
    Ok(())
}

impl Transport for CurlTransport {
    fn probe(&self, url: &str, auth: Option<&Credentials>) -> Result<(), TransferError> {
        let mut easy = self.handle(url, auth)?;
        easy.nobody(true)?; // HEAD request
        easy.perform()?;
        check_status(&mut easy)
    }

    fn download(
        &self,
        url: &str,
        auth: Option<&Credentials>,
        dest: &Path,
        progress: &dyn ProgressSink,
    ) -> Result<u64, TransferError> {
        let mut file = File::create(dest).map_err(TransferError::Storage)?;
        let mut easy = self.handle(url, auth)?;
        easy.progress(true)?;

        let label = label_for(url);
        let started = Instant::now();
        let mut written: u64 = 0;
        let mut write_error: Option<std::io::Error> = None;

        let result = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match file.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_error = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.progress_function(|dltotal, dlnow, _, _| {
                progress.update(&TransferProgress {
                    label: label.clone(),
                    bytes_done: dlnow as u64,
                    total_bytes: (dltotal > 0.0).then_some(dltotal as u64),
                    elapsed_secs: started.elapsed().as_secs_f64(),
                });
                true
            })?;
            transfer.perform()
        };
        progress.finish(&label);

        if let Some(e) = write_error {
            return Err(TransferError::Storage(e));
        }
        result?;
        check_status(&mut easy)?;
        file.flush().map_err(TransferError::Storage)?;
        file.sync_all().map_err(TransferError::Storage)?;
        Ok(written)
    }
}
