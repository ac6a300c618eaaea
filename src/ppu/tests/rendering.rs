//! Pipeline output: background tiles, sprites, priority, masking

use super::*;
use crate::display::palette_rgba;

/// Background + show-left-background
const BG: u8 = 0x0A;

/// Sprites + show-left-sprites
const SP: u8 = 0x14;

#[test]
fn test_background_tile_renders() {
    let mut ppu = Ppu::new();
    let cart = solid_tile_cartridge();

    ppu.vram[0] = 0x01; // top-left tile of nametable A is solid tile 1
    ppu.palette_ram[0] = 0x0F;
    ppu.palette_ram[1] = 0x21;
    ppu.mask = BG;

    run_frame(&mut ppu, &cart);

    assert_eq!(
        ppu.frame().pixel(0, 0),
        palette_rgba(0x21),
        "tile 1 pixel through background palette 0 entry 1"
    );
    assert_eq!(
        ppu.frame().pixel(0, 8),
        palette_rgba(0x0F),
        "row below the tile is backdrop"
    );
    assert_eq!(
        ppu.frame().pixel(8, 0),
        palette_rgba(0x0F),
        "column right of the tile is backdrop"
    );
}

#[test]
fn test_background_attribute_selects_palette() {
    let mut ppu = Ppu::new();
    let cart = solid_tile_cartridge();

    ppu.vram[0] = 0x01;
    // Attribute byte 0 covers tiles (0,0)-(3,3); palette 2 in the
    // top-left quadrant lives in bits 0-1.
    ppu.vram[0x3C0] = 0x02;
    ppu.palette_ram[0x09] = 0x2A; // background palette 2, entry 1
    ppu.mask = BG;

    run_frame(&mut ppu, &cart);
    assert_eq!(ppu.frame().pixel(0, 0), palette_rgba(0x2A));
}

#[test]
fn test_left_8_background_mask() {
    let mut ppu = Ppu::new();
    let cart = solid_tile_cartridge();

    for entry in 0..32 {
        ppu.vram[entry] = 0x01; // whole top tile row solid
    }
    ppu.palette_ram[0] = 0x0F;
    ppu.palette_ram[1] = 0x21;
    ppu.mask = 0x08; // background on, left 8 pixels masked

    run_frame(&mut ppu, &cart);

    assert_eq!(
        ppu.frame().pixel(0, 0),
        palette_rgba(0x0F),
        "masked column shows backdrop"
    );
    assert_eq!(ppu.frame().pixel(7, 0), palette_rgba(0x0F));
    assert_eq!(
        ppu.frame().pixel(8, 0),
        palette_rgba(0x21),
        "unmasked columns draw the tile"
    );
}

#[test]
fn test_sprite_renders_one_line_below_its_y() {
    let mut ppu = Ppu::new();
    let cart = solid_tile_cartridge();

    ppu.oam[0..4].copy_from_slice(&[10, 0x01, 0x00, 20]); // Y, tile, attr, X
    ppu.palette_ram[0] = 0x0F;
    ppu.palette_ram[0x11] = 0x16; // sprite palette 0, entry 1
    ppu.mask = SP;

    run_frame(&mut ppu, &cart);

    assert_eq!(
        ppu.frame().pixel(20, 11),
        palette_rgba(0x16),
        "OAM Y is the line above the first rendered row"
    );
    assert_eq!(
        ppu.frame().pixel(20, 10),
        palette_rgba(0x0F),
        "nothing on the Y line itself"
    );
    assert_eq!(
        ppu.frame().pixel(27, 11),
        palette_rgba(0x16),
        "eight pixels wide"
    );
    assert_eq!(ppu.frame().pixel(28, 11), palette_rgba(0x0F));
    assert_eq!(ppu.frame().pixel(19, 11), palette_rgba(0x0F));
}

#[test]
fn test_sprite_priority_behind_background() {
    let mut ppu = Ppu::new();
    let cart = solid_tile_cartridge();

    for entry in 0..960 {
        ppu.vram[entry] = 0x01; // opaque background everywhere
    }
    ppu.palette_ram[1] = 0x21;
    ppu.palette_ram[0x11] = 0x16;
    ppu.oam[0..4].copy_from_slice(&[40, 0x01, 0x20, 60]); // behind-background priority
    ppu.mask = BG | SP;

    run_frame(&mut ppu, &cart);
    assert_eq!(
        ppu.frame().pixel(60, 41),
        palette_rgba(0x21),
        "priority bit 1 hides the sprite behind opaque background"
    );

    // Flip the priority bit: the sprite wins.
    ppu.oam[2] = 0x00;
    run_frame(&mut ppu, &cart);
    assert_eq!(ppu.frame().pixel(60, 41), palette_rgba(0x16));
}

#[test]
fn test_sprite_zero_hit_sets_status() {
    let mut ppu = Ppu::new();
    let cart = solid_tile_cartridge();

    for entry in 0..960 {
        ppu.vram[entry] = 0x01;
    }
    ppu.oam[0..4].copy_from_slice(&[30, 0x01, 0x00, 50]);
    ppu.mask = BG | SP;

    run_to(&mut ppu, &cart, 100, 0);
    assert_ne!(ppu.status & 0x40, 0, "sprite 0 over opaque background hits");
}

#[test]
fn test_no_sprite_zero_hit_without_overlap() {
    let mut ppu = Ppu::new();
    let cart = solid_tile_cartridge();

    // Transparent background everywhere: no overlap, no hit.
    ppu.oam[0..4].copy_from_slice(&[30, 0x01, 0x00, 50]);
    ppu.mask = BG | SP;

    run_to(&mut ppu, &cart, 100, 0);
    assert_eq!(ppu.status & 0x40, 0);
}

#[test]
fn test_sprite_horizontal_flip() {
    let mut ppu = Ppu::new();
    // Tile 1 row 0: leftmost pixel only
    let cart = cartridge_with_chr(false, &[(16, 0x80)]);

    ppu.palette_ram[0] = 0x0F;
    ppu.palette_ram[0x11] = 0x16;
    ppu.oam[0..4].copy_from_slice(&[10, 0x01, 0x40, 100]); // horizontal flip
    ppu.mask = SP;

    run_frame(&mut ppu, &cart);
    assert_eq!(
        ppu.frame().pixel(107, 11),
        palette_rgba(0x16),
        "flip moves the pixel to the right edge"
    );
    assert_eq!(ppu.frame().pixel(100, 11), palette_rgba(0x0F));
}

#[test]
fn test_sprite_vertical_flip() {
    let mut ppu = Ppu::new();
    // Tile 1: row 0 opaque, rows 1-7 empty
    let cart = cartridge_with_chr(false, &[(16, 0xFF)]);

    ppu.palette_ram[0] = 0x0F;
    ppu.palette_ram[0x11] = 0x16;
    ppu.oam[0..4].copy_from_slice(&[100, 0x01, 0x80, 40]); // vertical flip
    ppu.mask = SP;

    run_frame(&mut ppu, &cart);
    assert_eq!(
        ppu.frame().pixel(40, 101),
        palette_rgba(0x0F),
        "flipped top row is the empty row 7"
    );
    assert_eq!(
        ppu.frame().pixel(40, 108),
        palette_rgba(0x16),
        "row 0 lands at the bottom"
    );
}

#[test]
fn test_8x16_sprite_uses_tile_pair() {
    let mut ppu = Ppu::new();
    // Tile 2 fully opaque, tile 3 empty; tile byte 2 selects bank 0.
    let chr: Vec<(usize, u8)> = (32..40).map(|i| (i, 0xFF)).collect();
    let cart = cartridge_with_chr(false, &chr);

    ppu.ctrl = 0x20; // 8x16 sprites
    ppu.palette_ram[0] = 0x0F;
    ppu.palette_ram[0x11] = 0x16;
    ppu.oam[0..4].copy_from_slice(&[50, 0x02, 0x00, 30]);
    ppu.mask = SP;

    run_frame(&mut ppu, &cart);
    assert_eq!(
        ppu.frame().pixel(30, 51),
        palette_rgba(0x16),
        "top half comes from tile 2"
    );
    assert_eq!(
        ppu.frame().pixel(30, 60),
        palette_rgba(0x0F),
        "bottom half comes from the empty tile 3"
    );
}

#[test]
fn test_front_sprite_beats_later_slots() {
    let mut ppu = Ppu::new();
    let cart = solid_tile_cartridge();

    ppu.palette_ram[0x11] = 0x16; // sprite palette 0
    ppu.palette_ram[0x15] = 0x27; // sprite palette 1
    // Two overlapping sprites; the lower OAM index wins.
    ppu.oam[0..4].copy_from_slice(&[60, 0x01, 0x00, 80]);
    ppu.oam[4..8].copy_from_slice(&[60, 0x01, 0x01, 80]);
    ppu.mask = SP;

    run_frame(&mut ppu, &cart);
    assert_eq!(ppu.frame().pixel(80, 61), palette_rgba(0x16));
}

#[test]
fn test_greyscale_masks_palette_index() {
    let mut ppu = Ppu::new();
    let cart = test_cartridge();

    ppu.palette_ram[0] = 0x21; // a blue that greyscales to white
    ppu.mask = 0x01; // greyscale only

    run_frame(&mut ppu, &cart);
    assert_eq!(
        ppu.frame().pixel(100, 100),
        palette_rgba(0x20),
        "palette index is masked with $30 on output"
    );
}
