use pathfinder_lib::{Error, PriorityQueue};

#[test]
fn serves_lowest_priority_first_with_fifo_ties() {
    let mut queue = PriorityQueue::new();
    queue.enqueue("three", 3.0);
    queue.enqueue("one-first", 1.0);
    queue.enqueue("two", 2.0);
    queue.enqueue("one-second", 1.0);

    let order: Vec<&str> = std::iter::from_fn(|| queue.dequeue().ok()).collect();
    assert_eq!(order, vec!["one-first", "one-second", "two", "three"]);
}

#[test]
fn peek_matches_next_dequeue_without_removing() {
    let mut queue = PriorityQueue::new();
    queue.enqueue('b', 2.0);
    queue.enqueue('a', 1.0);

    assert_eq!(*queue.peek().unwrap(), 'a');
    assert_eq!(queue.peek_priority().unwrap(), 1.0);
    assert_eq!(queue.len(), 2);
    assert_eq!(queue.dequeue().unwrap(), 'a');
    assert_eq!(queue.len(), 1);
}

#[test]
fn empty_queue_reads_fail() {
    let mut queue: PriorityQueue<u32> = PriorityQueue::new();

    let error = queue.dequeue().expect_err("dequeue on empty queue");
    assert!(matches!(error, Error::EmptyQueue { operation: "dequeue" }));
    assert!(error.is_precondition_violation());

    assert!(matches!(
        queue.peek(),
        Err(Error::EmptyQueue { operation: "peek" })
    ));
}

#[test]
fn clear_discards_everything() {
    let mut queue: PriorityQueue<u32> = (0..5).map(|n| (n, f64::from(n))).collect();
    assert_eq!(queue.len(), 5);
    assert!(!queue.is_empty());

    queue.clear();
    assert!(queue.is_empty());
    assert!(queue.dequeue().is_err());
}

#[test]
fn interleaved_operations_keep_order() {
    let mut queue = PriorityQueue::new();
    queue.enqueue(10, 5.0);
    queue.enqueue(20, 1.0);
    assert_eq!(queue.dequeue().unwrap(), 20);

    queue.enqueue(30, 5.0);
    queue.enqueue(40, 0.5);
    assert_eq!(queue.dequeue_with_priority().unwrap(), (40, 0.5));
    assert_eq!(queue.dequeue().unwrap(), 10);
    assert_eq!(queue.dequeue().unwrap(), 30);
}
