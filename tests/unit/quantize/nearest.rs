//! Tests for nearest-color lookup

#[cfg(test)]
mod tests {
    use brickify::palette::{ExtendedColorTable, PaletteRegistry};
    use brickify::quantize::nearest::{map_nearest, nearest_index, squared_distance};
    use image::{Rgb, RgbImage};

    // Tests squared distance on each channel
    #[test]
    fn test_squared_distance() {
        assert_eq!(squared_distance([0, 0, 0], [0, 0, 0]), 0);
        assert_eq!(squared_distance([0, 0, 0], [3, 4, 0]), 25);
        assert_eq!(squared_distance([255, 255, 255], [0, 0, 0]), 3 * 255 * 255);
    }

    // Tests exact and approximate matches against the bw palette
    #[test]
    fn test_nearest_index_bw() {
        let table = PaletteRegistry::new().get_table("bw").expect("bw exists");

        assert_eq!(nearest_index(&table, [255, 255, 255]), 4);
        assert_eq!(nearest_index(&table, [10, 5, 0]), 0);
        assert_eq!(nearest_index(&table, [100, 120, 110]), 2);
        assert_eq!(nearest_index(&table, [250, 240, 245]), 4);
    }

    // Tests ties resolve to the lowest index, so padding never wins
    // Verified by using <= in the comparison
    #[test]
    fn test_ties_prefer_lowest_index() {
        let table = ExtendedColorTable::extend(&[[0, 0, 0], [10, 10, 10]]).expect("non-empty");

        assert_eq!(nearest_index(&table, [5, 5, 5]), 0);
        assert_eq!(nearest_index(&table, [200, 200, 200]), 1);
        assert_eq!(nearest_index(&table, [1, 1, 1]), 0);
    }

    // Tests grid shape is (height, width) and values match per-pixel lookup
    #[test]
    fn test_map_nearest_shape() {
        let table = PaletteRegistry::new().get_table("bw").expect("bw exists");
        let mut image = RgbImage::from_pixel(3, 2, Rgb([255, 255, 255]));
        image.put_pixel(2, 1, Rgb([0, 0, 0]));
        let indices = map_nearest(&image, &table);

        assert_eq!(indices.dim(), (2, 3));
        assert_eq!(indices.get((0, 0)), Some(&4));
        assert_eq!(indices.get((1, 2)), Some(&0));
    }
}
