pub use schooldesk_models::MessageResponse;
pub use schooldesk_models::fees::{
    CreateFeesDto, FeesEntry, FeesEntryResponse, FeesListResponse, FeesRecord,
    FeesRecordResponse, UpdateFeesDto,
};

pub const FEES_NOT_FOUND: &str = "Fees history not found";
pub const FEES_DELETED: &str = "Deleted successfully";
