mod executor;
mod synthesis;
