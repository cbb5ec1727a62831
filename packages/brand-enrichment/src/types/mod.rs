pub mod answer;
pub mod evidence;
pub mod exclusion;
pub mod log;
pub mod outcome;
pub mod reference;
pub mod table;
