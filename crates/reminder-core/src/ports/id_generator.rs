//! IdGenerator port - ID 生成の抽象化
//!
//! テスト容易性のために trait として抽象化しています。
//!
//! # 実装
//! - **UlidGenerator**: ULID ベース（本番用）

use crate::domain::ids::{OwnerId, SubjectId};
use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator はストアに登録する行の ID を生成
///
/// # Thread Safety
/// - `Send + Sync` を要求（複数スレッドから使える）
pub trait IdGenerator: Send + Sync {
    fn generate_subject_id(&self) -> SubjectId;

    fn generate_owner_id(&self) -> OwnerId;
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// Clock の現在時刻を timestamp 部分に使うので、
/// 登録順に並ぶ ID になります。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    fn next_ulid(&self) -> Ulid {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        Ulid::from_parts(timestamp_ms, rand::random())
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_subject_id(&self) -> SubjectId {
        SubjectId::from(self.next_ulid())
    }

    fn generate_owner_id(&self) -> OwnerId {
        OwnerId::from(self.next_ulid())
    }
}
