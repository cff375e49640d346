//! Mock implementations for testing

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::client::CatApi;
use crate::error::{CatteryError, Result};
use crate::model::{Image, Vote, VoteDirection};

/// A call observed by the mock, for assertions on request traffic
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    ListImages { limit: u32 },
    ListVotes,
    UploadImage { filename: String },
    DeleteImage { image_id: String },
    CastVote { image_id: String, value: i64 },
    AddFavourite { image_id: String },
    RemoveFavourite { favourite_id: i64 },
}

/// Mock [`CatApi`] with queued responses and scripted failures
///
/// Reads pop from a per-endpoint queue (empty queue means an empty list);
/// any operation can be made to fail once via [`fail_next`](Self::fail_next).
#[derive(Debug, Default)]
pub struct MockCatApi {
    images: Mutex<VecDeque<Vec<Image>>>,
    votes: Mutex<VecDeque<Vec<Vote>>>,
    failures: Mutex<Vec<(&'static str, CatteryError)>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockCatApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next image list request
    pub fn push_images(&self, images: Vec<Image>) {
        self.images.lock().unwrap().push_back(images);
    }

    /// Queue a response for the next vote list request
    pub fn push_votes(&self, votes: Vec<Vote>) {
        self.votes.lock().unwrap().push_back(votes);
    }

    /// Make the next call to the named operation fail with the given error
    pub fn fail_next(&self, operation: &'static str, error: CatteryError) {
        self.failures.lock().unwrap().push((operation, error));
    }

    /// Every call the mock has served, in order
    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn take_failure(&self, operation: &str) -> Option<CatteryError> {
        let mut failures = self.failures.lock().unwrap();
        let index = failures.iter().position(|(op, _)| *op == operation)?;
        Some(failures.remove(index).1)
    }
}

impl CatApi for MockCatApi {
    async fn list_images(&self, limit: u32) -> Result<Vec<Image>> {
        self.record(RecordedCall::ListImages { limit });
        if let Some(err) = self.take_failure("list_images") {
            return Err(err);
        }
        Ok(self.images.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn list_votes(&self) -> Result<Vec<Vote>> {
        self.record(RecordedCall::ListVotes);
        if let Some(err) = self.take_failure("list_votes") {
            return Err(err);
        }
        Ok(self.votes.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn upload_image(&self, filename: &str, _bytes: Vec<u8>) -> Result<()> {
        self.record(RecordedCall::UploadImage {
            filename: filename.to_string(),
        });
        match self.take_failure("upload_image") {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn delete_image(&self, image_id: &str) -> Result<()> {
        self.record(RecordedCall::DeleteImage {
            image_id: image_id.to_string(),
        });
        match self.take_failure("delete_image") {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn cast_vote(&self, image_id: &str, direction: VoteDirection) -> Result<()> {
        self.record(RecordedCall::CastVote {
            image_id: image_id.to_string(),
            value: direction.value(),
        });
        match self.take_failure("cast_vote") {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn add_favourite(&self, image_id: &str) -> Result<()> {
        self.record(RecordedCall::AddFavourite {
            image_id: image_id.to_string(),
        });
        match self.take_failure("add_favourite") {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn remove_favourite(&self, favourite_id: i64) -> Result<()> {
        self.record(RecordedCall::RemoveFavourite { favourite_id });
        match self.take_failure("remove_favourite") {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
