pub mod mode_machine;
pub mod timer_queue;
