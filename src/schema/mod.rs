use serde::{Deserialize, Serialize};

pub mod course;

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse{
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DeleteAllResponse{
    pub message: String,
    pub deleted: u64,
}
