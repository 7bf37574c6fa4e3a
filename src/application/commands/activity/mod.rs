mod record;
mod service;

pub use record::RecordActivity;
pub use service::ActivityRecorder;
