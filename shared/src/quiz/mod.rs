pub mod quiz_coordinator;
