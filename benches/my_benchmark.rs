use chip8vm::quirks::Quirks;
use chip8vm::Chip8;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// A tiny program that loops drawing and re-clearing a sprite, chosen so a
/// benchmark iteration exercises the fetch-execute cycle, the ALU and the
/// sprite blitter without ever halting.
const LOOP_ROM: &[u8] = &[
    0x60, 0x00, // V0 := 0
    0x61, 0x00, // V1 := 0
    0xA0, 0x00, // I := 0x000 (font '0')
    0xD0, 0x15, // draw 5-row sprite at (V0, V1)
    0x70, 0x01, // V0 += 1
    0x12, 0x06, // jump back to the draw instruction
];

fn get_default_chip() -> Chip8 {
    let mut chip = Chip8::new(Quirks::default());
    chip.load(LOOP_ROM).expect("benchmark program is valid");
    chip
}

pub fn tick_bench(c: &mut Criterion) {
    let mut chip = get_default_chip();
    c.bench_function("tick", |b| {
        b.iter(|| {
            black_box(chip.tick().expect("benchmark program never faults"));
        });
    });
}

pub fn print_bench(c: &mut Criterion) {
    let chip = get_default_chip();
    c.bench_function("print", |b| {
        b.iter(|| {
            let _ = format!("{}", chip);
        });
    });
}

criterion_group!(benches, tick_bench, print_bench);
criterion_main!(benches);
