use tracing::{info, instrument};

use schooldesk_core::AppError;
use schooldesk_db::FeesStore;
use schooldesk_models::FeesRecordId;

use super::model::{CreateFeesDto, FEES_NOT_FOUND, FeesEntry, FeesRecord, UpdateFeesDto};

pub struct FeesService;

impl FeesService {
    /// Records a payment. The student reference is stored as given.
    #[instrument(skip(fees, dto), fields(student_id = %dto.student_id))]
    pub async fn create_fees(
        fees: &dyn FeesStore,
        dto: CreateFeesDto,
    ) -> Result<FeesRecord, AppError> {
        let record = fees.insert_fees(dto).await?;
        info!(fees_id = %record.id, "Fees record created");
        Ok(record)
    }

    #[instrument(skip(fees))]
    pub async fn get_fees_history(fees: &dyn FeesStore) -> Result<Vec<FeesEntry>, AppError> {
        Ok(fees.list_fees().await?)
    }

    #[instrument(skip(fees))]
    pub async fn get_fees(fees: &dyn FeesStore, id: FeesRecordId) -> Result<FeesEntry, AppError> {
        fees
            .find_fees(id)
            .await?
            .ok_or_else(|| AppError::not_found(FEES_NOT_FOUND))
    }

    #[instrument(skip(fees, dto))]
    pub async fn update_fees(
        fees: &dyn FeesStore,
        id: FeesRecordId,
        dto: UpdateFeesDto,
    ) -> Result<FeesRecord, AppError> {
        fees
            .update_fees(id, dto)
            .await?
            .ok_or_else(|| AppError::not_found(FEES_NOT_FOUND))
    }

    #[instrument(skip(fees))]
    pub async fn delete_fees(fees: &dyn FeesStore, id: FeesRecordId) -> Result<(), AppError> {
        if !fees.delete_fees(id).await? {
            return Err(AppError::not_found(FEES_NOT_FOUND));
        }
        Ok(())
    }
}
