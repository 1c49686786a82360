pub mod run;
pub mod shortcuts;
