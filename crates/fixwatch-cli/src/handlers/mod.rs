pub mod doctor;
pub mod export;
pub mod live;
pub mod results;
pub mod run;
pub mod watch;
