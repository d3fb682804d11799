/// Application layer: use cases and their request/summary types
pub mod dto;
pub mod use_cases;
