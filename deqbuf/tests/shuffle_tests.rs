use blockpool::BlockPool;
use deqbuf::{DeqBuf, SeededRandom};

#[test]
fn test_same_seed_same_permutation() {
    let pool = BlockPool::new();
    let values: Vec<i32> = (0..64).collect();

    let mut first = DeqBuf::from_slice(&pool, &values).unwrap();
    let mut second = DeqBuf::from_slice(&pool, &values).unwrap();

    first.shuffle(&mut SeededRandom::new(99));
    second.shuffle(&mut SeededRandom::new(99));

    assert_eq!(first.as_view(), second.as_view());
}

#[test]
fn test_different_seeds_different_permutations() {
    let pool = BlockPool::new();
    let values: Vec<i32> = (0..64).collect();

    let mut first = DeqBuf::from_slice(&pool, &values).unwrap();
    let mut second = DeqBuf::from_slice(&pool, &values).unwrap();

    first.shuffle(&mut SeededRandom::new(1));
    second.shuffle(&mut SeededRandom::new(2));

    assert_ne!(first.as_view(), second.as_view());
}

#[test]
fn test_shuffle_preserves_elements() {
    let pool = BlockPool::new();
    let values: Vec<i32> = (0..100).collect();
    let mut buf = DeqBuf::from_slice(&pool, &values).unwrap();

    buf.shuffle(&mut SeededRandom::new(7));

    let mut sorted = buf.to_vec();
    sorted.sort_unstable();
    assert_eq!(sorted, values);
}

#[test]
fn test_shuffle_default_preserves_elements() {
    let pool = BlockPool::new();
    let values: Vec<i32> = (0..32).collect();
    let mut buf = DeqBuf::from_slice(&pool, &values).unwrap();

    buf.shuffle_default();

    let mut sorted = buf.to_vec();
    sorted.sort_unstable();
    assert_eq!(sorted, values);
}

#[test]
fn test_shuffle_trivial_buffers() {
    let pool = BlockPool::new();

    let mut buf: DeqBuf<i32> = DeqBuf::new(&pool).unwrap();
    buf.shuffle(&mut SeededRandom::new(3));
    assert!(buf.is_empty());

    let mut buf = DeqBuf::from_slice(&pool, &[42]).unwrap();
    buf.shuffle(&mut SeededRandom::new(3));
    assert_eq!(buf.as_view(), &[42]);
}

#[test]
fn test_shuffle_advances_generation() {
    let pool = BlockPool::new();
    let mut buf = DeqBuf::from_slice(&pool, &[1, 2, 3]).unwrap();

    let before = buf.generation();
    buf.shuffle(&mut SeededRandom::new(11));
    assert_ne!(buf.generation(), before);
}
