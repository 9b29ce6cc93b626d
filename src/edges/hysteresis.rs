//! Hysteresis: weak edges survive only when 8-connected to a strong edge.
use super::nms::{EdgeClass, EdgeMap};
use crate::image::BinaryMask;

pub fn hysteresis(map: &EdgeMap) -> BinaryMask {
    let (w, h) = (map.w, map.h);
    let mut mask = BinaryMask::new(w, h);
    let mut visited = vec![false; w * h];
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for (i, &class) in map.classes.iter().enumerate() {
        if class == EdgeClass::Strong && !visited[i] {
            visited[i] = true;
            stack.push((i % w, i / w));
        }
    }

    while let Some((x, y)) = stack.pop() {
        mask.set(x, y, true);
        for dy in -1isize..=1 {
            for dx in -1isize..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if nx < 0 || ny < 0 || nx as usize >= w || ny as usize >= h {
                    continue;
                }
                let ni = ny as usize * w + nx as usize;
                if !visited[ni] && map.classes[ni] != EdgeClass::Suppressed {
                    visited[ni] = true;
                    stack.push((nx as usize, ny as usize));
                }
            }
        }
    }

    mask
}
