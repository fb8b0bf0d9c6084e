use blockpool::BlockPool;
use deqbuf::DeqBuf;

#[test]
fn test_forward_iteration_order() {
    let pool = BlockPool::new();
    let buf = DeqBuf::from_slice(&pool, &[1, 2, 3, 4]).unwrap();

    let collected: Vec<i32> = buf.iter().copied().collect();
    assert_eq!(collected, vec![1, 2, 3, 4]);
}

#[test]
fn test_reverse_iteration_order() {
    let pool = BlockPool::new();
    let buf = DeqBuf::from_slice(&pool, &[1, 2, 3, 4]).unwrap();

    let collected: Vec<i32> = buf.iter_rev().copied().collect();
    assert_eq!(collected, vec![4, 3, 2, 1]);
}

#[test]
fn test_for_loop_over_reference() {
    let pool = BlockPool::new();
    let buf = DeqBuf::from_slice(&pool, &[10, 20, 30]).unwrap();

    let mut sum = 0;
    for value in &buf {
        sum += value;
    }
    assert_eq!(sum, 60);
}

#[test]
fn test_exact_size_hints() {
    let pool = BlockPool::new();
    let buf = DeqBuf::from_slice(&pool, &[1, 2, 3]).unwrap();

    let mut iter = buf.iter();
    assert_eq!(iter.len(), 3);
    iter.next();
    assert_eq!(iter.size_hint(), (2, Some(2)));

    let mut rev = buf.iter_rev();
    assert_eq!(rev.len(), 3);
    rev.next();
    assert_eq!(rev.size_hint(), (2, Some(2)));
}

#[test]
fn test_empty_buffer_iterators() {
    let pool = BlockPool::new();
    let buf: DeqBuf<i32> = DeqBuf::new(&pool).unwrap();

    assert_eq!(buf.iter().next(), None);
    assert_eq!(buf.iter_rev().next(), None);
}

#[test]
fn test_iterators_are_cloneable() {
    let pool = BlockPool::new();
    let buf = DeqBuf::from_slice(&pool, &[1, 2, 3]).unwrap();

    let mut iter = buf.iter();
    iter.next();
    let fork = iter.clone();

    assert_eq!(iter.copied().collect::<Vec<_>>(), vec![2, 3]);
    assert_eq!(fork.copied().collect::<Vec<_>>(), vec![2, 3]);
}

#[test]
fn test_iteration_after_mixed_edits() {
    let pool = BlockPool::new();
    let mut buf = DeqBuf::new(&pool).unwrap();

    buf.append_slice(&[3, 4]).unwrap();
    buf.prepend_slice(&[1, 2]).unwrap();
    buf.insert(2, 9).unwrap();
    buf.remove(0, 1).unwrap();

    let collected: Vec<i32> = buf.iter().copied().collect();
    assert_eq!(collected, vec![2, 9, 3, 4]);
}
