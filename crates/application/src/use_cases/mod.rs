pub mod archive;

pub use archive::ArchiveLogsUseCase;
