pub mod doubt_service;
pub mod encyclopedia_service;
pub mod generative_service;
pub mod grading_service;
pub mod quiz_service;
