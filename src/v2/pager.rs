/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::Client;
use crate::v2::errors::OnfidoError;
use async_stream::stream;
use futures::Stream;
use log::{trace, warn};
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use tokio_util::sync::CancellationToken;
use url::Url;

/// JSON object wrapping the items of one page in a named array field
pub trait Envelope: DeserializeOwned {
    type Item;

    fn into_items(self) -> Vec<Self::Item>;
}

/// Turns the raw body of a page into its items
pub type PageDecoder<T> = fn(&[u8]) -> Result<Vec<T>, OnfidoError>;

/// [`PageDecoder`] for any [`Envelope`]
pub fn decode_envelope<E: Envelope>(body: &[u8]) -> Result<Vec<E::Item>, OnfidoError> {
    Ok(serde_json::from_slice::<E>(body)?.into_items())
}

/// Lazily walks a server paginated collection, one page in memory at a time.
///
/// ```no_run
/// # use onfido::v2::{Client, Config, LivePhoto};
/// # use tokio_util::sync::CancellationToken;
/// # async fn run(client: Client) -> Result<(), onfido::v2::OnfidoError> {
/// let cancel = CancellationToken::new();
/// let mut photos = LivePhoto::list(client, "applicant-id")?;
/// while photos.advance(&cancel).await {
///     println!("{:?}", photos.current()?.file_name);
/// }
/// if let Some(err) = photos.err() {
///     eprintln!("listing stopped: {err}");
/// }
/// # Ok(())
/// # }
/// ```
///
/// A pager is forward only. Create a new one to scan the collection again. It is not meant to
/// be shared between concurrent callers.
pub struct Pager<T> {
    client: Client,
    next_url: Option<Url>,
    page: VecDeque<T>,
    current: Option<T>,
    decode: PageDecoder<T>,
    consumed: usize,
    error: Option<OnfidoError>,
}

impl<T> Pager<T> {
    pub fn new(client: Client, first_page: Url, decode: PageDecoder<T>) -> Self {
        Self {
            client,
            next_url: Some(first_page),
            page: VecDeque::new(),
            current: None,
            decode,
            consumed: 0,
            error: None,
        }
    }

    /// Moves to the next item, fetching the next page when the current one is used up.
    ///
    /// Returns false once the collection is exhausted or a request failed; [`Pager::err`]
    /// tells the two apart. Failures are final. A cancelled advance leaves the pager as it
    /// was before the call and can be retried.
    pub async fn advance(&mut self, cancel: &CancellationToken) -> bool {
        if matches!(self.error, Some(OnfidoError::Cancelled)) {
            self.error = None;
        } else if self.error.is_some() {
            return false;
        }

        loop {
            if let Some(item) = self.page.pop_front() {
                self.current = Some(item);
                self.consumed += 1;
                return true;
            }

            let Some(url) = self.next_url.clone() else {
                self.current = None;
                return false;
            };

            trace!("Fetching page {url}");
            let page = match self.client.api().get_page(url, cancel).await {
                Ok(page) => page,
                Err(OnfidoError::Cancelled) => {
                    self.error = Some(OnfidoError::Cancelled);
                    return false;
                }
                Err(err) => {
                    self.fail(err);
                    return false;
                }
            };
            match (self.decode)(&page.body) {
                Ok(items) => {
                    self.page = items.into();
                    self.next_url = page.next;
                }
                Err(err) => {
                    self.fail(err);
                    return false;
                }
            }
        }
    }

    /// Item the last successful [`Pager::advance`] moved to
    pub fn current(&self) -> Result<&T, OnfidoError> {
        self.current.as_ref().ok_or(OnfidoError::NoCurrentItem)
    }

    /// Error that stopped the pager, or the cancellation of the last advance
    pub fn err(&self) -> Option<&OnfidoError> {
        self.error.as_ref()
    }

    /// Number of items moved to so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// No more items will be produced
    pub fn is_terminal(&self) -> bool {
        match &self.error {
            Some(OnfidoError::Cancelled) => false,
            Some(_) => true,
            None => self.page.is_empty() && self.next_url.is_none(),
        }
    }

    /// Converts the pager into a stream of items. The stream ends after the last item or
    /// after yielding the error that stopped it.
    pub fn into_stream(
        self,
        cancel: CancellationToken,
    ) -> impl Stream<Item = Result<T, OnfidoError>> {
        let mut pager = self;
        stream! {
            while pager.advance(&cancel).await {
                if let Some(item) = pager.current.take() {
                    yield Ok(item);
                }
            }
            if let Some(err) = pager.error.take() {
                yield Err(err);
            }
        }
    }

    fn fail(&mut self, err: OnfidoError) {
        warn!("Paging stopped: {err}");
        self.page.clear();
        self.next_url = None;
        self.current = None;
        self.error = Some(err);
    }
}

impl<T> std::fmt::Debug for Pager<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("next_url", &self.next_url)
            .field("buffered", &self.page.len())
            .field("consumed", &self.consumed)
            .field("error", &self.error)
            .finish()
    }
}
