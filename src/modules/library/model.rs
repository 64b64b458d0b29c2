pub use schooldesk_models::MessageResponse;
pub use schooldesk_models::library::{
    CreateLibraryDto, LibraryEntry, LibraryEntryResponse, LibraryListResponse, LibraryRecord,
    LibraryRecordResponse, UpdateLibraryDto,
};

pub const LIBRARY_NOT_FOUND: &str = "History not found";
pub const LIBRARY_DELETED: &str = "History deleted successfully";
