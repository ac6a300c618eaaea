// PPU constants

/// Size of one nametable in bytes (1KB)
pub(super) const NAMETABLE_SIZE: usize = 1024;

/// Size of palette RAM in bytes
pub(super) const PALETTE_SIZE: usize = 32;

/// Primary OAM size in bytes (64 sprites x 4 bytes)
pub(super) const OAM_SIZE: usize = 256;

/// Secondary OAM size in bytes (8 sprites x 4 bytes)
pub(super) const SECONDARY_OAM_SIZE: usize = 32;

// ========================================
// PPU Timing Constants (NTSC)
// ========================================

/// Last dot index of a scanline
pub(super) const LAST_DOT: u16 = 340;

/// Pre-render scanline, conventionally written -1 (equivalently 261)
pub(super) const PRERENDER_SCANLINE: i16 = -1;

/// Last visible scanline
pub(super) const LAST_VISIBLE_SCANLINE: i16 = 239;

/// Post-render scanline (idle)
pub(super) const POSTRENDER_SCANLINE: i16 = 240;

/// First vertical-blanking scanline; vblank rises at its dot 1
pub(super) const FIRST_VBLANK_SCANLINE: i16 = 241;

/// Last vertical-blanking scanline
pub(super) const LAST_VBLANK_SCANLINE: i16 = 260;

// ========================================
// PPUCTRL bits
// ========================================

/// VRAM address increment after PPUDATA access (0: +1, 1: +32)
pub(super) const CTRL_VRAM_INCREMENT: u8 = 0x04;

/// Sprite pattern table for 8x8 sprites (0: $0000, 1: $1000)
pub(super) const CTRL_SPRITE_TABLE: u8 = 0x08;

/// Background pattern table (0: $0000, 1: $1000)
pub(super) const CTRL_BACKGROUND_TABLE: u8 = 0x10;

/// Sprite size (0: 8x8, 1: 8x16)
pub(super) const CTRL_SPRITE_SIZE: u8 = 0x20;

/// Generate NMI at the start of vblank
pub(super) const CTRL_NMI_ENABLE: u8 = 0x80;

// ========================================
// PPUMASK bits
// ========================================

/// Greyscale output (palette index masked with $30)
pub(super) const MASK_GREYSCALE: u8 = 0x01;

/// Show background in the leftmost 8 pixels
pub(super) const MASK_BACKGROUND_LEFT: u8 = 0x02;

/// Show sprites in the leftmost 8 pixels
pub(super) const MASK_SPRITE_LEFT: u8 = 0x04;

/// Enable background rendering
pub(super) const MASK_SHOW_BACKGROUND: u8 = 0x08;

/// Enable sprite rendering
pub(super) const MASK_SHOW_SPRITES: u8 = 0x10;

// ========================================
// PPUSTATUS bits
// ========================================

/// Sprite overflow (more than 8 sprites evaluated in range)
pub(super) const STATUS_SPRITE_OVERFLOW: u8 = 0x20;

/// Sprite 0 hit
pub(super) const STATUS_SPRITE_ZERO_HIT: u8 = 0x40;

/// Vertical blanking has started (cleared by reading PPUSTATUS)
pub(super) const STATUS_VBLANK: u8 = 0x80;
