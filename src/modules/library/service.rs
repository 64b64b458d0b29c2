use tracing::{info, instrument};

use schooldesk_core::AppError;
use schooldesk_db::LibraryStore;
use schooldesk_models::LibraryRecordId;

use super::model::{
    CreateLibraryDto, LIBRARY_NOT_FOUND, LibraryEntry, LibraryRecord, UpdateLibraryDto,
};

pub struct LibraryService;

impl LibraryService {
    /// Records a book issue against a student.
    #[instrument(skip(library, dto), fields(student_id = %dto.student_id))]
    pub async fn create_loan(
        library: &dyn LibraryStore,
        dto: CreateLibraryDto,
    ) -> Result<LibraryRecord, AppError> {
        let record = library.insert_loan(dto).await?;
        info!(loan_id = %record.id, "Library loan recorded");
        Ok(record)
    }

    #[instrument(skip(library))]
    pub async fn get_loans(library: &dyn LibraryStore) -> Result<Vec<LibraryEntry>, AppError> {
        Ok(library.list_loans().await?)
    }

    #[instrument(skip(library))]
    pub async fn get_loan(
        library: &dyn LibraryStore,
        id: LibraryRecordId,
    ) -> Result<LibraryEntry, AppError> {
        library
            .find_loan(id)
            .await?
            .ok_or_else(|| AppError::not_found(LIBRARY_NOT_FOUND))
    }

    #[instrument(skip(library, dto))]
    pub async fn update_loan(
        library: &dyn LibraryStore,
        id: LibraryRecordId,
        dto: UpdateLibraryDto,
    ) -> Result<LibraryRecord, AppError> {
        library
            .update_loan(id, dto)
            .await?
            .ok_or_else(|| AppError::not_found(LIBRARY_NOT_FOUND))
    }

    #[instrument(skip(library))]
    pub async fn delete_loan(
        library: &dyn LibraryStore,
        id: LibraryRecordId,
    ) -> Result<(), AppError> {
        if !library.delete_loan(id).await? {
            return Err(AppError::not_found(LIBRARY_NOT_FOUND));
        }
        Ok(())
    }
}
