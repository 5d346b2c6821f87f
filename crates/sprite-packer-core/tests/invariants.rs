use rand::{Rng, SeedableRng};
use sprite_packer_core::prelude::*;
use std::collections::HashMap;

fn disjoint(rects: &[Rect]) -> bool {
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            if rects[i].intersects(&rects[j]) {
                return false;
            }
        }
    }
    true
}

fn place_or_grow(tree: &mut SplitTree, w: u32, h: u32) -> Rect {
    if !<SplitTree as Packer<usize>>::can_pack(tree, &Rect::new(0, 0, w, h)) {
        tree.grow(w, h).expect("grow");
    }
    tree.insert(w, h).expect("fit")
}

fn random_sizes(seed: u64, n: usize, max_w: u32, max_h: u32) -> Vec<(u32, u32)> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (rng.gen_range(1..=max_w), rng.gen_range(1..=max_h)))
        .collect()
}

fn check_placement(sizes: &[(u32, u32)], out: &Placement<usize>) {
    // completeness
    assert_eq!(out.len(), sizes.len());
    let mut seen: HashMap<usize, usize> = HashMap::new();
    for r in out {
        *seen.entry(r.id).or_default() += 1;
        assert_eq!((r.width, r.height), sizes[r.id], "size changed for id={}", r.id);
    }
    assert_eq!(seen.len(), sizes.len());
    assert!(seen.values().all(|&c| c == 1));

    // containment
    let canvas = out.canvas();
    for r in out {
        assert!(canvas.contains(&r.rect()), "id={} escapes the canvas", r.id);
    }

    // no overlap
    let rects: Vec<Rect> = out.iter().map(|r| r.rect()).collect();
    assert!(disjoint(&rects));
}

#[test]
fn random_mixed_sizes_hold_invariants() {
    for seed in [1u64, 7, 42, 1234] {
        let sizes = random_sizes(seed, 150, 64, 64);
        let inputs: Vec<(usize, u32, u32)> =
            sizes.iter().enumerate().map(|(i, &(w, h))| (i, w, h)).collect();
        let out = pack_layout(inputs, PackerConfig::default()).expect("pack");
        check_placement(&sizes, &out);
    }
}

#[test]
fn random_skewed_sizes_hold_invariants() {
    // long thin strips in both orientations
    let mut sizes = random_sizes(99, 60, 300, 5);
    sizes.extend(random_sizes(100, 60, 5, 300));
    let inputs: Vec<(usize, u32, u32)> =
        sizes.iter().enumerate().map(|(i, &(w, h))| (i, w, h)).collect();
    let out = pack_layout(inputs, PackerConfig::default()).expect("pack");
    check_placement(&sizes, &out);
}

#[test]
fn free_regions_and_placements_tile_the_canvas() {
    let sizes = random_sizes(5, 80, 40, 40);
    let rects: Vec<Rectangle<usize>> = sizes
        .iter()
        .enumerate()
        .map(|(i, &(w, h))| Rectangle { id: i, width: w, height: h })
        .collect();
    let sorted = sort_for_packing(rects);
    let mut tree = SplitTree::new(sorted[0].width, sorted[0].height);
    let mut placed: Vec<Rect> = Vec::new();
    for r in &sorted {
        placed.push(place_or_grow(&mut tree, r.width, r.height));
    }
    let free: Vec<Rect> = tree.free_regions().collect();
    let canvas_area = tree.width() as u64 * tree.height() as u64;
    let covered: u64 = placed.iter().chain(free.iter()).map(|r| r.area()).sum();
    assert_eq!(covered, canvas_area);

    let mut all = placed.clone();
    all.extend(free.iter().copied());
    assert!(disjoint(&all));
}

#[test]
fn canvas_area_never_shrinks() {
    let sizes = random_sizes(11, 120, 50, 50);
    let rects: Vec<Rectangle<usize>> = sizes
        .iter()
        .enumerate()
        .map(|(i, &(w, h))| Rectangle { id: i, width: w, height: h })
        .collect();
    let sorted = sort_for_packing(rects);
    let mut tree = SplitTree::new(sorted[0].width, sorted[0].height);
    let mut last_area = 0u64;
    let mut placed: Vec<Rect> = Vec::new();
    for r in &sorted {
        placed.push(place_or_grow(&mut tree, r.width, r.height));
        let area = tree.width() as u64 * tree.height() as u64;
        assert!(area >= last_area);
        last_area = area;
        // earlier placements are never moved by growth
        let canvas = Rect::new(0, 0, tree.width(), tree.height());
        assert!(placed.iter().all(|p| canvas.contains(p)));
    }
}

#[test]
fn split_tree_as_fixed_packer_refuses_overflow() {
    let mut tree = SplitTree::new(16, 16);
    let mut placed = Vec::new();
    for i in 0..5 {
        let r = Rect::new(0, 0, 8, 8);
        if let Some(p) = <SplitTree as Packer<usize>>::pack(&mut tree, i, &r) {
            placed.push(p);
        }
    }
    assert_eq!(placed.len(), 4);
    assert!(!<SplitTree as Packer<usize>>::can_pack(&tree, &Rect::new(0, 0, 1, 1)));
    assert_eq!((tree.width(), tree.height()), (16, 16));
}

#[test]
fn containment_uses_exclusive_far_edges() {
    let canvas = Rect::new(0, 0, 20, 20);
    assert!(canvas.contains(&Rect::new(10, 10, 10, 10)));
    assert!(!canvas.contains(&Rect::new(11, 10, 10, 10)));
    assert!(!canvas.contains(&Rect::new(0, 15, 1, 6)));
    let edge = Rect::new(0, 0, u32::MAX, u32::MAX);
    assert!(edge.contains(&Rect::new(u32::MAX - 1, 0, 1, 1)));
}
