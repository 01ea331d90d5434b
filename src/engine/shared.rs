use std::sync::{Arc, Mutex, PoisonError};

use super::coordinator::Engine;

/// Cloneable handle that serializes composite operations through one lock.
/// A poisoned lock is recovered.
#[derive(Debug, Clone)]
pub struct SharedEngine {
    engine: Arc<Mutex<Engine>>,
}

impl SharedEngine {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut Engine) -> R) -> R {
        let mut engine = self.engine.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryPath;
    use crate::config::EngineSettings;
    use crate::media::ViewerId;
    use std::thread;

    #[test]
    fn test_concurrent_plays_are_serialized() {
        let mut engine = Engine::new(EngineSettings {
            history_capacity: 100,
            ..Default::default()
        })
        .unwrap();
        let id = engine.create_video("A", &CategoryPath::root()).unwrap();
        let shared = SharedEngine::new(engine);

        let handles: Vec<_> = (0..4)
            .map(|n| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let viewer = ViewerId::from(format!("viewer-{}", n));
                    for _ in 0..10 {
                        shared.with(|engine| engine.play(id, &viewer)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        shared.with(|engine| {
            assert_eq!(engine.video(id).unwrap().views(), 40);
            assert_eq!(engine.history().count(), 40);
        });
    }
}
