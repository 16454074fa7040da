mod concurrency;
mod grid_contract;
mod persistence;
mod shell;
