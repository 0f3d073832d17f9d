//! Interactive shell channel with prompt-based reads.

use std::time::Duration;

use log::trace;
use regex::bytes::Regex;
use russh::ChannelMsg;
use russh::client::Msg;

use super::buffer::PatternBuffer;
use crate::error::{ChannelError, Result, TransportError};

/// A PTY shell channel that reads until one of a set of patterns appears.
pub struct ShellChannel {
    channel: russh::Channel<Msg>,
    buffer: PatternBuffer,
    read_timeout: Option<Duration>,
}

impl ShellChannel {
    /// Wrap an open shell channel.
    pub fn new(channel: russh::Channel<Msg>, search_depth: usize, read_timeout: Option<Duration>) -> Self {
        Self {
            channel,
            buffer: PatternBuffer::new(search_depth),
            read_timeout,
        }
    }

    /// Send one line of input.
    pub async fn write_line(&mut self, line: &str) -> Result<()> {
        let data = format!("{line}\n");
        self.channel
            .data(data.as_bytes())
            .await
            .map_err(ChannelError::Ssh)?;
        Ok(())
    }

    /// Read until any of `patterns` matches the buffer tail.
    ///
    /// Returns everything read so far (ANSI-stripped, lossily decoded) and
    /// the index of the pattern that matched.
    pub async fn read_until(&mut self, patterns: &[&Regex]) -> Result<(String, usize)> {
        match self.read_timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.read_until_inner(patterns))
                .await
                .map_err(|_| TransportError::Timeout(timeout))?,
            None => self.read_until_inner(patterns).await,
        }
    }

    async fn read_until_inner(&mut self, patterns: &[&Regex]) -> Result<(String, usize)> {
        loop {
            if let Some(index) = patterns.iter().position(|p| self.buffer.tail_contains(p)) {
                let data = self.buffer.take();
                return Ok((String::from_utf8_lossy(&data).into_owned(), index));
            }

            match self.channel.wait().await {
                Some(ChannelMsg::Data { ref data }) => {
                    trace!("received {} bytes", data.len());
                    self.buffer.extend(data);
                }
                Some(ChannelMsg::ExtendedData { ref data, .. }) => self.buffer.extend(data),
                Some(ChannelMsg::Eof | ChannelMsg::Close) | None => {
                    return Err(ChannelError::Closed.into());
                }
                Some(_) => {}
            }
        }
    }

    /// Close the channel.
    pub async fn close(self) -> Result<()> {
        self.channel.close().await.map_err(ChannelError::Ssh)?;
        Ok(())
    }
}
