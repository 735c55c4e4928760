pub mod flowers;
