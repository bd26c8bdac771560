mod bit_mask_tests;
