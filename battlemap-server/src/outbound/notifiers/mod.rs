use crate::domain::{models::BattleMap, ports::CreatorNotifier};

#[derive(Debug, Clone)]
pub struct NullNotifier;

impl CreatorNotifier for NullNotifier {
    async fn map_created(&self, _: &BattleMap) {}
}
