//! pcv-grid lib test modules
