mod link;
mod repository;
