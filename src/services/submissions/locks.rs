use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// 按提交 ID 分配的异步互斥锁
///
/// 锁在最后一个持有者释放时从表中移除。
#[derive(Debug, Default)]
pub struct SubmissionLocks {
    locks: DashMap<i64, Arc<Mutex<()>>>,
}

/// 持有期间同一提交上的其他迁移会等待
pub struct SubmissionLockGuard<'a> {
    locks: &'a SubmissionLocks,
    submission_id: i64,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for SubmissionLockGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        // 等待者各自持有一份 Arc，只剩表中引用时才移除
        self.locks
            .locks
            .remove_if(&self.submission_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl SubmissionLocks {
    /// 等待并持有该提交的锁，guard 释放时解锁
    pub async fn acquire(&self, submission_id: i64) -> SubmissionLockGuard<'_> {
        // 分片锁在 await 之前释放
        let lock = self.locks.entry(submission_id).or_default().clone();
        let guard = lock.lock_owned().await;
        SubmissionLockGuard {
            locks: self,
            submission_id,
            guard: Some(guard),
        }
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
