pub mod message;
pub mod task;

pub use message::{ApiResponse, JobInfoData, JobInfoQuery, SubmitData};
pub use task::{JobRecord, JobStatus, RunMode, TaskData};
