pub mod doctor;
pub mod enums;
pub mod lab;
pub mod patient;
pub mod report;

pub use doctor::{NewRefDoctor, RefDoctor};
pub use enums::Status;
pub use lab::LabInfo;
pub use patient::{NewPatient, Patient};
pub use report::{RecentReport, ReportCount};
pub use test::{NewTestResult, TestResult};
