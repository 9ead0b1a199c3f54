use super::model::Location;
use crate::domain::Repository;

pub trait LocationRepository: Repository<Location> {}
