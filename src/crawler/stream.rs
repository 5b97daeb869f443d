//! Result stream between crawl tasks and the consumer
//!
//! Many tasks produce pages, one consumer reads them. Producers never close
//! the stream themselves: it is closed exactly once, by the task whose
//! retirement completes the session.

use crate::crawler::page::Page;
use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc;

/// Producer side of the result stream, shared by all tasks of a session
#[derive(Debug)]
pub struct ResultStream {
    sender: Mutex<Option<mpsc::UnboundedSender<Page>>>,
}

impl ResultStream {
    /// Creates a connected producer/consumer pair
    pub fn channel() -> (Self, PageStream) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                sender: Mutex::new(Some(sender)),
            },
            PageStream { receiver },
        )
    }

    /// Hands a page over to the consumer
    ///
    /// Sending never blocks. If the consumer has gone away the page is
    /// dropped; the crawl itself carries on to completion.
    pub fn send(&self, page: Page) {
        let sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        match sender.as_ref() {
            Some(sender) => {
                if let Err(mpsc::error::SendError(page)) = sender.send(page) {
                    tracing::debug!("Consumer gone, dropping result for {}", page.url);
                }
            }
            None => {
                tracing::error!("Result for {} sent after stream close", page.url);
            }
        }
    }

    /// Closes the stream
    ///
    /// # Returns
    ///
    /// * `true` - This call closed the stream
    /// * `false` - The stream was already closed
    pub fn close(&self) -> bool {
        let mut sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        sender.take().is_some()
    }

    /// Returns true once the stream has been closed
    pub fn is_closed(&self) -> bool {
        let sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        sender.is_none()
    }
}

/// Consumer side of the result stream
///
/// Yields pages in arrival order and ends once the session is complete.
#[derive(Debug)]
pub struct PageStream {
    receiver: mpsc::UnboundedReceiver<Page>,
}

impl PageStream {
    /// Waits for the next page; `None` once the stream is closed and drained
    pub async fn next(&mut self) -> Option<Page> {
        self.receiver.recv().await
    }

    /// Reads the stream to the end
    pub async fn collect(mut self) -> Vec<Page> {
        let mut pages = Vec::new();
        while let Some(page) = self.next().await {
            pages.push(page);
        }
        pages
    }
}
