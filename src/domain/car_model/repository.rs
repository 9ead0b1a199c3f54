use super::model::CarModel;
use crate::domain::Repository;

pub trait CarModelRepository: Repository<CarModel> {}
