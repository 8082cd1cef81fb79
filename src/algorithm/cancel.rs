//! 协作式取消
//!
//! 求解循环每轮检查一次标志位

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 可在线程间共享的取消标志
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// 请求取消
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// 返回一个在 drop 时触发取消的守卫
    pub fn drop_guard(&self) -> CancelOnDrop {
        CancelOnDrop {
            flag: self.clone(),
            armed: true,
        }
    }
}

/// drop 时取消求解，除非先调用了 [`CancelOnDrop::disarm`]
#[derive(Debug)]
pub struct CancelOnDrop {
    flag: CancellationFlag,
    armed: bool,
}

impl CancelOnDrop {
    /// 求解正常完成后解除
    pub fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        if self.armed {
            self.flag.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_shared() {
        let flag = CancellationFlag::new();
        let other = flag.clone();
        assert!(!other.is_cancelled());
        flag.cancel();
        assert!(other.is_cancelled());
    }

    #[test]
    fn test_drop_guard() {
        let flag = CancellationFlag::new();
        {
            let _guard = flag.drop_guard();
        }
        assert!(flag.is_cancelled());

        let flag = CancellationFlag::new();
        flag.drop_guard().disarm();
        assert!(!flag.is_cancelled());
    }
}
