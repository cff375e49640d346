//! Cached reads and invalidating mutations over the remote API
//!
//! Reads serve the cached value when it is fresh and otherwise go through a
//! sequence-guarded fetch. Mutations call the API and, on success, mark the
//! related cache stale so the next read re-fetches. Votes additionally apply
//! an optimistic delta before the call goes out; a failed vote is not rolled
//! back, the provisional score stands until the next successful re-fetch.

use std::sync::Arc;
use tracing::debug;

use crate::cache::Store;
use crate::client::CatApi;
use crate::error::Result;
use crate::model::{Image, VoteDirection};
use crate::ui::{messages, Ui};
use crate::upload::UploadFile;
use crate::votes::VoteTally;

pub struct CatService<C: CatApi> {
    client: Arc<C>,
    store: Store,
    ui: Ui,
    list_limit: u32,
}

impl<C: CatApi> CatService<C> {
    pub fn new(client: Arc<C>, list_limit: u32) -> Self {
        Self {
            client,
            store: Store::new(),
            ui: Ui::new(),
            list_limit,
        }
    }

    /// The cache store, exposed for inspection in tests
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The image list, cached under the `cats` query
    pub async fn cats(&self) -> Result<Vec<Image>> {
        if let Some(cats) = self.store.cats.get() {
            return Ok(cats);
        }

        let ticket = self.store.cats.begin_fetch();
        match self.client.list_images(self.list_limit).await {
            Ok(images) => {
                self.store.cats.complete_fetch(ticket, images.clone());
                Ok(images)
            }
            Err(e) => {
                self.ui.error(messages::GET_CATS_FAILED);
                Err(e)
            }
        }
    }

    /// The aggregated vote scores, cached under the `votes` query
    ///
    /// Warns when the vote log hit the page ceiling and the tally may be
    /// incomplete; the read still succeeds.
    pub async fn votes(&self) -> Result<VoteTally> {
        if let Some(tally) = self.store.votes.get() {
            return Ok(tally);
        }

        let ticket = self.store.votes.begin_fetch();
        match self.client.list_votes().await {
            Ok(votes) => {
                let tally = VoteTally::from_votes(&votes);
                if tally.truncated() {
                    self.ui.warning(messages::VOTES_TRUNCATED);
                }
                self.store.votes.complete_fetch(ticket, tally.clone());
                Ok(tally)
            }
            Err(e) => {
                self.ui.error(messages::GET_VOTES_FAILED);
                Err(e)
            }
        }
    }

    pub async fn upvote(&self, image_id: &str) -> Result<()> {
        self.vote(image_id, VoteDirection::Up).await
    }

    pub async fn downvote(&self, image_id: &str) -> Result<()> {
        self.vote(image_id, VoteDirection::Down).await
    }

    /// Cast a vote, adjusting the cached score before the call resolves
    async fn vote(&self, image_id: &str, direction: VoteDirection) -> Result<()> {
        let delta = direction.value();

        // Optimistic update: rewrite the cached tally now so the score
        // reflects the vote without waiting for the round trip.
        if self.store.votes.get_stale().is_some() {
            self.store.votes.mutate(|tally| tally.apply_delta(image_id, delta));
        } else {
            // Nothing fetched yet: seed a provisional tally, stale, so the
            // next read still asks the server for the real aggregate.
            let mut tally = VoteTally::default();
            tally.apply_delta(image_id, delta);
            self.store.votes.set_provisional(tally);
        }

        debug!(image_id, delta, "vote pending");
        match self.client.cast_vote(image_id, direction).await {
            Ok(()) => {
                debug!(image_id, "vote settled");
                self.store.votes.invalidate();
                Ok(())
            }
            Err(e) => {
                // The provisional delta stays; the next successful re-fetch
                // restores the authoritative score.
                self.ui.error(messages::VOTE_FAILED);
                Err(e)
            }
        }
    }

    pub async fn delete(&self, image_id: &str) -> Result<()> {
        debug!(image_id, "delete pending");
        match self.client.delete_image(image_id).await {
            Ok(()) => {
                debug!(image_id, "delete settled");
                self.store.cats.invalidate();
                Ok(())
            }
            Err(e) => {
                self.ui.error(messages::DELETE_FAILED);
                Err(e)
            }
        }
    }

    pub async fn favourite(&self, image_id: &str) -> Result<()> {
        match self.client.add_favourite(image_id).await {
            Ok(()) => {
                self.store.cats.invalidate();
                Ok(())
            }
            Err(e) => {
                self.ui.error(messages::FAVOURITE_FAILED);
                Err(e)
            }
        }
    }

    /// Remove a favourite by its record id (not the image id)
    pub async fn unfavourite(&self, favourite_id: i64) -> Result<()> {
        match self.client.remove_favourite(favourite_id).await {
            Ok(()) => {
                self.store.cats.invalidate();
                Ok(())
            }
            Err(e) => {
                self.ui.error(messages::UNFAVOURITE_FAILED);
                Err(e)
            }
        }
    }

    /// Upload a pre-validated image file
    pub async fn upload(&self, file: UploadFile) -> Result<()> {
        debug!(filename = %file.filename, "upload pending");
        match self.client.upload_image(&file.filename, file.bytes).await {
            Ok(()) => {
                debug!("upload settled");
                self.store.cats.invalidate();
                Ok(())
            }
            Err(e) => {
                self.ui.error(messages::UPLOAD_FAILED);
                Err(e)
            }
        }
    }
}
