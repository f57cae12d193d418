//! Threaded token delivery.
//!
//! A spawned lexer runs on its own worker and hands tokens to the consumer
//! over a bounded channel. With the default capacity of zero each hand-off is
//! a rendezvous: the worker blocks until the consumer takes the token.
//!
//! The consumer can abandon the worker at any time with
//! [`TokenStream::cancel`] or by dropping the stream; the worker observes the
//! signal at its next hand-off and exits. Neither waits for the worker, use
//! [`TokenStream::join`] for that.

use std::{
    io::Read,
    thread::{self, JoinHandle},
    time::Duration,
};

use crossbeam::{
    channel::{self, Receiver, RecvTimeoutError, Sender},
    select,
};
use thiserror::Error;
use tracing::{debug, trace};

use super::{lexer::Lexer, tokens::Token};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamError {
    #[error("the terminal token has already been received")]
    Finished,
    #[error("timed out waiting for the next token")]
    Timeout,
    #[error("the stream was cancelled")]
    Cancelled,
    #[error("the lexer worker stopped before sending a terminal token")]
    Disconnected,
}

pub struct TokenStream {
    tokens: Receiver<Token>,
    cancel: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
    recv_timeout: Option<Duration>,
    finished: bool,
    cancelled: bool,
}

/// Runs `lexer` on a worker thread and returns the consuming end.
pub fn spawn<R>(lexer: Lexer<R>) -> TokenStream
where
    R: Read + Send + 'static,
{
    let config = lexer.config().clone();
    let (token_tx, token_rx) = channel::bounded(config.channel_capacity);
    let (cancel_tx, cancel_rx) = channel::bounded(1);

    let worker = thread::spawn(move || produce(lexer, token_tx, cancel_rx));

    TokenStream {
        tokens: token_rx,
        cancel: Some(cancel_tx),
        worker: Some(worker),
        recv_timeout: config.recv_timeout,
        finished: false,
        cancelled: false,
    }
}

fn produce<R: Read>(lexer: Lexer<R>, tokens: Sender<Token>, cancel: Receiver<()>) {
    for token in lexer {
        trace!(target: "kaleidoscope::lexer", %token, "hand-off");
        select! {
            send(tokens, token) -> sent => {
                if sent.is_err() {
                    debug!(target: "kaleidoscope::lexer", "consumer went away");
                    return;
                }
            }
            recv(cancel) -> _ => {
                debug!(target: "kaleidoscope::lexer", "producer cancelled");
                return;
            }
        }
    }
}

impl TokenStream {
    /// Blocks until the next token arrives.
    pub fn recv(&mut self) -> Result<Token, StreamError> {
        self.check_open()?;
        let received = self.tokens.recv().map_err(|_| StreamError::Disconnected);
        self.settle(received)
    }

    /// Like [`TokenStream::recv`], giving up after `timeout`. A timeout leaves
    /// the stream usable.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Result<Token, StreamError> {
        self.check_open()?;
        let received = self.tokens.recv_timeout(timeout).map_err(|err| match err {
            RecvTimeoutError::Timeout => StreamError::Timeout,
            RecvTimeoutError::Disconnected => StreamError::Disconnected,
        });
        self.settle(received)
    }

    /// Tells the worker to stop. Tokens not yet received are discarded.
    pub fn cancel(&mut self) {
        if self.cancelled {
            return;
        }
        self.cancelled = true;

        if let Some(cancel) = self.cancel.take() {
            // Full or disconnected both mean the worker already knows or is gone.
            let _ = cancel.try_send(());
        }
        debug!(target: "kaleidoscope::lexer", "stream cancelled");
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Stops the worker if it is still producing, then waits for it to exit.
    /// A worker that panicked reports [`StreamError::Disconnected`].
    pub fn join(mut self) -> Result<(), StreamError> {
        if !self.finished {
            self.cancel();
        }
        self.join_worker()
    }

    fn check_open(&self) -> Result<(), StreamError> {
        if self.cancelled {
            Err(StreamError::Cancelled)
        } else if self.finished {
            Err(StreamError::Finished)
        } else {
            Ok(())
        }
    }

    fn settle(&mut self, received: Result<Token, StreamError>) -> Result<Token, StreamError> {
        match &received {
            Ok(token) if token.is_terminal() => self.finished = true,
            Err(StreamError::Disconnected) => self.finished = true,
            _ => {}
        }
        received
    }

    fn join_worker(&mut self) -> Result<(), StreamError> {
        match self.worker.take() {
            Some(worker) => worker.join().map_err(|_| StreamError::Disconnected),
            None => Ok(()),
        }
    }
}

impl Iterator for TokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let received = match self.recv_timeout {
            Some(timeout) => self.recv_timeout(timeout),
            None => self.recv(),
        };

        match received {
            Ok(token) => Some(token),
            Err(StreamError::Timeout) => {
                self.cancel();
                None
            }
            Err(_) => None,
        }
    }
}

impl Drop for TokenStream {
    /// Signals the worker without waiting for it: a worker stalled on its
    /// reader exits at its next hand-off.
    fn drop(&mut self) {
        if !self.finished {
            self.cancel();
        }
    }
}
