use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

struct Listeners<T: ?Sized> {
	next_id: u64,
	entries: Vec<(u64, Listener<T>)>,
}

/// Single-threaded publish/subscribe channel.
///
/// Listeners are invoked in subscription order. No borrow is held while they run, so a listener may
/// publish, subscribe or unsubscribe re-entrantly; listeners added during a publish only see later
/// values.
pub struct Publisher<T: ?Sized + 'static> {
	listeners: Rc<RefCell<Listeners<T>>>,
}

impl<T: ?Sized> Clone for Publisher<T> {
	fn clone(&self) -> Self {
		Self {
			listeners: self.listeners.clone(),
		}
	}
}

impl<T: ?Sized> Default for Publisher<T> {
	fn default() -> Self {
		Self {
			listeners: Rc::new(RefCell::new(Listeners {
				next_id: 0,
				entries: Vec::new(),
			})),
		}
	}
}

impl<T: ?Sized> fmt::Debug for Publisher<T> {
	fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
		fmt.debug_struct("Publisher")
			.field("listeners", &self.len())
			.finish()
	}
}

impl<T: ?Sized> Publisher<T> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
		let id = {
			let mut listeners = self.listeners.borrow_mut();
			let id = listeners.next_id;
			listeners.next_id += 1;
			listeners.entries.push((id, Rc::new(listener)));
			id
		};
		let listeners: Weak<RefCell<Listeners<T>>> = Rc::downgrade(&self.listeners);
		Subscription {
			remove: Some(Box::new(move || {
				if let Some(listeners) = listeners.upgrade() {
					listeners.borrow_mut().entries.retain(|(i, _)| *i != id);
				}
			})),
		}
	}

	pub fn publish(&self, value: &T) {
		let snapshot: Vec<Listener<T>> = self
			.listeners
			.borrow()
			.entries
			.iter()
			.map(|(_, listener)| listener.clone())
			.collect();
		for listener in snapshot {
			listener(value);
		}
	}

	pub fn len(&self) -> usize {
		self.listeners.borrow().entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Handle returned by [`Publisher::subscribe`]. Dropping it keeps the listener registered; call
/// [`Subscription::remove`] to detach.
pub struct Subscription {
	remove: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
	pub fn remove(mut self) {
		if let Some(remove) = self.remove.take() {
			remove();
		}
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
		fmt.write_str("Subscription")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::Cell;

	#[test]
	fn publish_in_order() {
		let publisher = Publisher::<str>::new();
		let log = Rc::new(RefCell::new(Vec::new()));
		let _a = {
			let log = log.clone();
			publisher.subscribe(move |s: &str| log.borrow_mut().push(format!("a:{s}")))
		};
		let _b = {
			let log = log.clone();
			publisher.subscribe(move |s: &str| log.borrow_mut().push(format!("b:{s}")))
		};
		publisher.publish("x");
		assert_eq!(*log.borrow(), ["a:x", "b:x"]);
	}

	#[test]
	fn remove() {
		let publisher = Publisher::<u32>::new();
		let count = Rc::new(Cell::new(0));
		let subscription = {
			let count = count.clone();
			publisher.subscribe(move |v| count.set(count.get() + v))
		};
		publisher.publish(&2);
		assert_eq!(publisher.len(), 1);
		subscription.remove();
		assert!(publisher.is_empty());
		publisher.publish(&3);
		assert_eq!(count.get(), 2);
	}

	#[test]
	fn reentrant_subscribe() {
		let publisher = Publisher::<u32>::new();
		let seen = Rc::new(Cell::new(0));
		let _outer = {
			let publisher = publisher.clone();
			let seen = seen.clone();
			publisher.clone().subscribe(move |_| {
				let seen = seen.clone();
				let _ = publisher.subscribe(move |v| seen.set(seen.get() + v));
			})
		};
		publisher.publish(&1);
		assert_eq!(seen.get(), 0);
		publisher.publish(&10);
		assert_eq!(seen.get(), 10);
	}

	#[test]
	fn remove_after_publisher_dropped() {
		let publisher = Publisher::<u32>::new();
		let subscription = publisher.subscribe(|_| {});
		drop(publisher);
		subscription.remove();
	}
}
