//! End-to-end behavior of subjects, operators and subscription lifetimes,
//! exercised only through the public API.

use std::{
  cell::{Cell, RefCell},
  convert::Infallible,
  rc::Rc,
};

use rxlite::prelude::*;

type Log<T> = Rc<RefCell<Vec<T>>>;

fn recorder<T: 'static>() -> (Log<T>, impl FnMut(T) + 'static) {
  let log: Log<T> = Rc::default();
  let c_log = log.clone();
  (log, move |v: T| c_log.borrow_mut().push(v))
}

#[test]
fn passthrough_delivers_only_later_events() {
  let subject = PassthroughSubject::<&str, Infallible>::new();
  let (early, on_early) = recorder::<&str>();
  let _a = subject.subscribe(on_early);
  subject.next("e1");
  let (late, on_late) = recorder::<&str>();
  let _b = subject.subscribe(on_late);
  subject.next("e2");
  subject.next("e3");

  assert_eq!(*early.borrow(), vec!["e1", "e2", "e3"]);
  assert_eq!(*late.borrow(), vec!["e2", "e3"]);
}

#[test]
fn current_value_is_always_delivered_first() {
  let subject = CurrentValueSubject::<i32, Infallible>::new(10);
  subject.next(11);
  let (log, on_next) = recorder::<i32>();
  let _s = subject.subscribe(on_next);
  subject.next(12);
  assert_eq!(*log.borrow(), vec![11, 12]);
}

#[test]
fn disposing_twice_is_the_same_as_once() {
  let subject = PassthroughSubject::<i32, Infallible>::new();
  let torn_down = Rc::new(Cell::new(0));
  let (log, on_next) = recorder::<i32>();
  let s = subject.subscribe(on_next);
  let c_torn_down = torn_down.clone();
  s.add_teardown(move || c_torn_down.set(c_torn_down.get() + 1));

  subject.next(1);
  s.dispose();
  s.dispose();
  subject.next(2);
  assert!(s.is_disposed());
  assert_eq!(torn_down.get(), 1);
  assert_eq!(*log.borrow(), vec![1]);
}

#[test]
fn operators_forward_terminals_to_every_subscriber() {
  let subject = PassthroughSubject::<i32, String>::new();
  let mapped = subject.map(|v| v + 1);
  let filtered = subject.filter(|_| false);
  let compacted = subject.compact_map(|_| None::<u8>);

  let log: Log<String> = Rc::default();
  let mut subs = SubscriptionBag::new();
  for tag in ["a", "b"] {
    let l = log.clone();
    mapped
      .subscribe_event(move |e| l.borrow_mut().push(format!("map {tag} {e:?}")))
      .store(&mut subs);
    let l = log.clone();
    filtered
      .subscribe_event(move |e| l.borrow_mut().push(format!("filter {tag} {e:?}")))
      .store(&mut subs);
    let l = log.clone();
    compacted
      .subscribe_event(move |e| l.borrow_mut().push(format!("compact {tag} {e:?}")))
      .store(&mut subs);
  }

  subject.next(1);
  subject.error("lost".to_owned());

  assert_eq!(
    *log.borrow(),
    vec![
      "map a Next(2)",
      "map b Next(2)",
      "map a Failed(\"lost\")",
      "map b Failed(\"lost\")",
      "filter a Failed(\"lost\")",
      "filter b Failed(\"lost\")",
      "compact a Failed(\"lost\")",
      "compact b Failed(\"lost\")",
    ]
  );
  // Terminated subscriptions report themselves closed and are pruned.
  subs.store(Subscription::new());
  assert_eq!(subs.len(), 1);
}

#[test]
fn combine_latest_pairs_latest_values() {
  let x = PassthroughSubject::<i32, Infallible>::new();
  let y = PassthroughSubject::<i32, Infallible>::new();
  let (log, on_next) = recorder::<(i32, i32)>();
  let _s = x.combine_latest(&y).subscribe(on_next);

  x.next(1);
  y.next(3);
  x.next(2);
  assert_eq!(*log.borrow(), vec![(1, 3), (2, 3)]);
}

#[test]
fn dispose_all_stops_stored_subscribers() {
  let subject = PassthroughSubject::<char, Infallible>::new();
  let mut bag = SubscriptionBag::new();
  let (log, on_next) = recorder::<char>();
  subject.subscribe(on_next).store(&mut bag);
  subject.map(|c| c.to_ascii_lowercase()).subscribe(|_| {}).store(&mut bag);

  subject.next('A');
  subject.next('B');
  bag.dispose_all();
  subject.next('C');

  assert_eq!(*log.borrow(), vec!['A', 'B']);
  assert_eq!(subject.subscriber_count(), 0);
}

#[test]
fn erased_view_matches_the_subject() {
  let subject = PassthroughSubject::<u8, &'static str>::new();
  let view: AnyObservable<u8, &'static str> = subject.clone().erase_to_any();

  let (direct, on_direct) = recorder::<Event<u8, &str>>();
  let (erased, on_erased) = recorder::<Event<u8, &str>>();
  let _a = subject.subscribe_event(on_direct);
  let _b = view.subscribe_event(on_erased);

  subject.next(1);
  subject.next(2);
  subject.error("eof");

  let expected = vec![Event::Next(1), Event::Next(2), Event::Failed("eof")];
  assert_eq!(*direct.borrow(), expected);
  assert_eq!(*erased.borrow(), expected);
}

#[test]
fn model_wiring_with_injected_subjects() {
  struct Thermostat {
    target: CurrentValueSubject<i32, Infallible>,
  }

  struct Display {
    text: Rc<RefCell<String>>,
    bag: SubscriptionBag,
  }

  impl Display {
    fn new(source: AnyObservable<i32, Infallible>) -> Self {
      let text = Rc::new(RefCell::new(String::new()));
      let mut bag = SubscriptionBag::new();
      let c_text = text.clone();
      source
        .map(|t| format!("{t}°C"))
        .assign(Setter(move |s: String| *c_text.borrow_mut() = s))
        .store(&mut bag);
      Display { text, bag }
    }
  }

  let thermostat = Thermostat { target: CurrentValueSubject::new(20) };
  let mut display = Display::new(thermostat.target.clone().erase_to_any());
  thermostat.target.set_value(22);
  assert_eq!(*display.text.borrow(), "22°C");

  display.bag.dispose_all();
  thermostat.target.set_value(18);
  assert_eq!(*display.text.borrow(), "22°C");
  assert_eq!(thermostat.target.subscriber_count(), 0);
}

#[test]
fn terminal_emitted_from_a_handler_reaches_it_after_return() {
  let subject = PassthroughSubject::<i32, Infallible>::new();
  let log: Log<Event<i32, Infallible>> = Rc::default();
  let (c_subject, c_log) = (subject.clone(), log.clone());
  let s = subject.subscribe_event(move |e| {
    c_log.borrow_mut().push(e.clone());
    if e == Event::Next(3) {
      c_subject.complete();
    }
  });

  (1..=3).for_each(|v| subject.next(v));
  assert_eq!(
    *log.borrow(),
    vec![Event::Next(1), Event::Next(2), Event::Next(3), Event::Completed]
  );
  assert!(s.is_disposed());
}

#[test]
fn handler_clamps_its_own_subject() {
  let level = CurrentValueSubject::<i32, Infallible>::new(0);
  let seen: Log<i32> = Rc::default();
  let (c_level, c_seen) = (level.clone(), seen.clone());
  let _s = level.subscribe(move |v: i32| {
    c_seen.borrow_mut().push(v);
    if v > 10 {
      c_level.set_value(10);
    }
  });

  level.set_value(42);
  assert_eq!(*seen.borrow(), vec![0, 42, 10]);
  assert_eq!(level.value(), 10);
}

#[test]
fn bounded_emit_from_a_sibling_reaches_everyone() {
  let subject = PassthroughSubject::<i32, Infallible>::new();
  let (first, on_first) = recorder::<i32>();
  let _a = subject.subscribe(on_first);
  let second: Log<i32> = Rc::default();
  let (c_subject, c_second) = (subject.clone(), second.clone());
  let _b = subject.subscribe(move |v: i32| {
    c_second.borrow_mut().push(v);
    if v == 1 {
      c_subject.next(2);
    }
  });

  subject.next(1);
  assert_eq!(*first.borrow(), vec![1, 2]);
  assert_eq!(*second.borrow(), vec![1, 2]);
}

#[test]
fn cold_source_feeds_a_subject() {
  let ticks = observable::create(|p: Producer<u32, &'static str>| {
    p.next(1);
    p.next(2);
    p.error("sensor offline");
    Subscription::new()
  });
  let relay = PassthroughSubject::<u32, &'static str>::new();
  let (log, on_event) = recorder::<Event<u32, &str>>();
  let _a = relay.subscribe_event(on_event);
  let b = ticks.subscribe_with(relay.as_observer());

  assert!(b.is_disposed());
  assert!(relay.is_terminated());
  assert_eq!(
    *log.borrow(),
    vec![Event::Next(1), Event::Next(2), Event::Failed("sensor offline")]
  );
}

#[cfg(feature = "stream")]
#[test]
fn stream_bridge_collects_until_completion() {
  use futures::{executor::block_on, StreamExt};

  let subject = PassthroughSubject::<i32, Infallible>::new();
  let stream = subject.filter(|v| v % 2 == 1).into_stream();
  (1..=5).for_each(|v| subject.next(v));
  subject.complete();

  let got: Vec<i32> = block_on(stream.map(|r| r.unwrap_or_else(|e| match e {})).collect());
  assert_eq!(got, vec![1, 3, 5]);
}
