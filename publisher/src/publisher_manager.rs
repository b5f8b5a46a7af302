use dashmap::DashMap;
use std::cmp::Eq;
use std::hash::Hash;
use std::sync::Arc;
use uuid::Uuid;

use crate::publisher::{Publishable, Publisher};
use crate::PublisherError;
use common::traits::Notifiable;

/// This module defines the `PublisherManager` struct, which manages publishers and their listeners.
/// It provides functionality to remove publishers, as well as to add and remove listeners
/// to/from specific publishers. Access to its internal data structures is thread-safe.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use uuid::Uuid;
/// use publisher::{Listener, PublisherManager};
/// use common::types::{SensorEvent, SensorType, XYZ};
///
/// // Create PublisherManager with an accelerometer publisher
/// let manager = PublisherManager::<SensorEvent, SensorType>::new(&[SensorType::Accelerometer]);
///
/// let mut listener = Listener::new(|_id: Uuid, event: Arc<SensorEvent>| {
///     println!("Event: {:?}", event);
/// });
///
/// // add listener to existing Accelerometer publisher
/// let id = manager.add_listener(&mut listener, &SensorType::Accelerometer).unwrap();
///
/// manager.notify_listeners(
///     &SensorType::Accelerometer,
///     Arc::new(SensorEvent::new(SensorType::Accelerometer, 0, XYZ::new([0.0, 0.0, 9.8]))),
/// );
///
/// // remove listener from Accelerometer publisher
/// manager.remove_listener(id).unwrap();
/// ```

pub struct PublisherManager<T, S> {
    publishers: Arc<DashMap<S, Publisher<T>>>,
    control: Arc<DashMap<Uuid, S>>,
}

impl<T, S> Clone for PublisherManager<T, S> {
    fn clone(&self) -> Self {
        Self {
            publishers: self.publishers.clone(),
            control: self.control.clone(),
        }
    }
}

impl<T, S> PublisherManager<T, S>
where
    T: Send + Sync + 'static,
    S: Send + Sync + Hash + Eq + Clone + Into<usize>,
{
    pub fn new(publisher_types: &[S]) -> Self {
        let collection = DashMap::<S, Publisher<T>>::new();
        for publisher_type in publisher_types {
            collection.insert(publisher_type.clone(), Publisher::new());
        }

        Self {
            publishers: Arc::new(collection),
            control: Arc::new(DashMap::new()),
        }
    }

    pub fn remove_publisher(&self, publisher_type: &S) {
        if let Some((_, publisher)) = self.publishers.remove(publisher_type) {
            publisher.unregister_all();
            self.control.retain(|_, s| s != publisher_type);
        }
    }

    pub fn get_available_publisher_types(&self) -> Vec<S> {
        let mut publisher_types: Vec<S> = self
            .publishers
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        publisher_types.sort_by_key(|publisher_type| (publisher_type.clone()).into());
        publisher_types
    }

    pub fn add_listener(
        &self,
        listener: &mut dyn Notifiable<T>,
        publisher_type: &S,
    ) -> Result<Uuid, PublisherError> {
        if let Some(publisher) = self.publishers.get(publisher_type) {
            let id = publisher.register_listener(listener);
            self.control.insert(id, publisher_type.clone());
            log::debug!("Listener {} added", id);
            return Ok(id);
        }
        Err(PublisherError::PublisherNotFound(
            "Publisher doesnt exist".to_string(),
        ))
    }

    /// Removes a listener and returns the type of the publisher it was registered with.
    pub fn remove_listener(&self, id: Uuid) -> Result<S, PublisherError> {
        let (_, publisher_type) = self.control.remove(&id).ok_or_else(|| {
            PublisherError::ListenerNotFound("Listener Id not found".to_string())
        })?;
        let publisher = self.publishers.get(&publisher_type).ok_or_else(|| {
            PublisherError::PublisherNotFound("Publisher doesnt exist".to_string())
        })?;
        publisher.unregister_listener(id)?;
        log::debug!("Listener {} removed", id);
        Ok(publisher_type)
    }

    /// Number of listeners registered with a publisher. Zero if the publisher doesn't exist.
    pub fn listener_count(&self, publisher_type: &S) -> usize {
        self.publishers
            .get(publisher_type)
            .map_or(0, |publisher| publisher.len())
    }

    pub fn notify_listeners(&self, publisher_type: &S, data: Arc<T>) {
        // Clone the publisher out so the map shard isn't held while callbacks run
        let publisher = self
            .publishers
            .get(publisher_type)
            .map(|entry| entry.value().clone());
        if let Some(publisher) = publisher {
            publisher.notify_listeners(data);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Listener;
    use common::types::{SensorEvent, SensorType, XYZ};
    use std::sync::Mutex;

    fn recording_listener(
        received: Arc<Mutex<Vec<SensorEvent>>>,
    ) -> Listener<SensorEvent> {
        Listener::new(move |_id: Uuid, event: Arc<SensorEvent>| {
            received.lock().unwrap().push(*event);
        })
    }

    fn event(sensor_type: SensorType, timestamp_ns: i64) -> Arc<SensorEvent> {
        Arc::new(SensorEvent::new(
            sensor_type,
            timestamp_ns,
            XYZ::new([0.0, 0.0, 0.0]),
        ))
    }

    #[test]
    fn test_new_manager() {
        let manager = PublisherManager::<SensorEvent, SensorType>::new(&[]);
        assert!(manager.get_available_publisher_types().is_empty());
    }

    #[test]
    fn test_publisher_types_sorted() {
        let manager = PublisherManager::<SensorEvent, SensorType>::new(&[
            SensorType::Magnetometer,
            SensorType::Accelerometer,
            SensorType::Gyroscope,
        ]);

        assert_eq!(manager.get_available_publisher_types(), SensorType::ALL.to_vec());
    }

    #[test]
    fn test_remove_publisher() {
        let manager = PublisherManager::<SensorEvent, SensorType>::new(&[
            SensorType::Accelerometer,
            SensorType::Gyroscope,
        ]);
        manager.remove_publisher(&SensorType::Accelerometer);

        assert_eq!(
            manager.get_available_publisher_types(),
            vec![SensorType::Gyroscope]
        );
    }

    #[test]
    fn test_remove_unknown_publisher() {
        let manager =
            PublisherManager::<SensorEvent, SensorType>::new(&[SensorType::Accelerometer]);
        manager.remove_publisher(&SensorType::Magnetometer);

        assert_eq!(
            manager.get_available_publisher_types(),
            vec![SensorType::Accelerometer]
        );
    }

    #[test]
    fn test_listeners_only_receive_their_publisher_events() {
        let manager = PublisherManager::<SensorEvent, SensorType>::new(&[
            SensorType::Accelerometer,
            SensorType::Gyroscope,
        ]);
        let received = Arc::new(Mutex::new(Vec::new()));
        let mut listener = recording_listener(received.clone());
        manager
            .add_listener(&mut listener, &SensorType::Gyroscope)
            .unwrap();

        manager.notify_listeners(&SensorType::Accelerometer, event(SensorType::Accelerometer, 1));
        manager.notify_listeners(&SensorType::Gyroscope, event(SensorType::Gyroscope, 2));

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].sensor_type(), SensorType::Gyroscope);
    }

    #[test]
    fn test_add_listener_to_nonexistent_publisher() {
        let manager = PublisherManager::<SensorEvent, SensorType>::new(&[]);
        let received = Arc::new(Mutex::new(Vec::new()));
        let mut listener = recording_listener(received);

        let result = manager.add_listener(&mut listener, &SensorType::Accelerometer);
        assert_eq!(
            result,
            Err(PublisherError::PublisherNotFound(
                "Publisher doesnt exist".to_string()
            ))
        );
    }

    #[test]
    fn test_remove_listener() {
        let manager =
            PublisherManager::<SensorEvent, SensorType>::new(&[SensorType::Accelerometer]);
        let received = Arc::new(Mutex::new(Vec::new()));
        let mut listener = recording_listener(received.clone());
        let id = manager
            .add_listener(&mut listener, &SensorType::Accelerometer)
            .unwrap();

        assert_eq!(manager.remove_listener(id), Ok(SensorType::Accelerometer));
        assert_eq!(manager.listener_count(&SensorType::Accelerometer), 0);

        manager.notify_listeners(&SensorType::Accelerometer, event(SensorType::Accelerometer, 1));
        assert!(received.lock().unwrap().is_empty());
    }

    #[test]
    fn test_remove_unknown_listener() {
        let manager =
            PublisherManager::<SensorEvent, SensorType>::new(&[SensorType::Accelerometer]);

        assert_eq!(
            manager.remove_listener(Uuid::new_v4()),
            Err(PublisherError::ListenerNotFound(
                "Listener Id not found".to_string()
            ))
        );
    }

    #[test]
    fn test_remove_listener_after_publisher_removed() {
        let manager = PublisherManager::<SensorEvent, SensorType>::new(&[
            SensorType::Accelerometer,
            SensorType::Gyroscope,
        ]);
        let received = Arc::new(Mutex::new(Vec::new()));
        let mut listener = recording_listener(received);
        let id = manager
            .add_listener(&mut listener, &SensorType::Accelerometer)
            .unwrap();

        manager.remove_publisher(&SensorType::Accelerometer);

        assert!(manager.remove_listener(id).is_err());
    }
}
