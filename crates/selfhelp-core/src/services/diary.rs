use crate::api::{endpoints, ApiClient, ApiError};
use crate::models::{Diary, DiaryUpdate, NewDiary, Page};

use super::PageQuery;

impl ApiClient {
    pub async fn create_diary(&self, diary: &NewDiary) -> Result<Diary, ApiError> {
        if let Some(field) = diary.missing_field() {
            return Err(ApiError::InvalidRequest(format!("{} is required", field)));
        }
        self.post(endpoints::DIARIES, diary).await
    }

    /// The signed-in user's entries, newest first
    pub async fn my_diaries(&self, page: u32, size: u32) -> Result<Page<Diary>, ApiError> {
        self.get_with_query(endpoints::MY_DIARIES, &PageQuery { page, size })
            .await
    }

    /// Everyone's public entries
    pub async fn public_diaries(&self, page: u32, size: u32) -> Result<Page<Diary>, ApiError> {
        self.get_with_query(endpoints::PUBLIC_DIARIES, &PageQuery { page, size })
            .await
    }

    pub async fn update_diary(&self, id: i64, update: &DiaryUpdate) -> Result<Diary, ApiError> {
        self.put(&endpoints::diary(id), update).await
    }

    pub async fn delete_diary(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&endpoints::diary(id)).await
    }
}
