pub mod intake;
pub mod listing;
pub mod matching;
pub mod notify;
pub mod profiles;
pub mod realworks;
