use std::thread;

use blockpool::BlockPool;

#[test]
fn test_concurrent_rent_recycle() {
    let pool: BlockPool<u64> = BlockPool::new();
    let mut handles = vec![];

    for _ in 0..4 {
        let pool = pool.clone();
        handles.push(thread::spawn(move || {
            for i in 0..250u64 {
                let mut block = pool.rent(32).unwrap();
                block[0] = i;
                pool.recycle(block);
            }
        }));
    }

    for handle in handles {
        handle.join().expect("thread panicked");
    }

    let stats = pool.stats();
    assert_eq!(stats.rented, 1000);
    assert_eq!(stats.recycled, 1000);
    // Every recycled block was either shelved or dropped at the limit.
    assert_eq!(stats.reused + stats.allocated, 1000);
    assert!(stats.retained <= 16);
}

#[test]
fn test_concurrent_mixed_classes() {
    let pool: BlockPool<u8> = BlockPool::new();
    let mut handles = vec![];

    for class in 0..4u32 {
        let pool = pool.clone();
        handles.push(thread::spawn(move || {
            let size = 8usize << class;
            for _ in 0..100 {
                let block = pool.rent(size).unwrap();
                assert_eq!(block.len(), size);
                pool.recycle(block);
            }
        }));
    }

    for handle in handles {
        handle.join().expect("thread panicked");
    }

    assert_eq!(pool.stats().rented, 400);
}
